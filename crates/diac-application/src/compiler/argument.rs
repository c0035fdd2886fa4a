//! Argument resolution

use super::on_demand::OnDemandCompiler;
use diac_domain::error::Result;
use diac_domain::ports::InjectorCapability;
use diac_domain::{Argument, BindingTable, Expr};

/// Decides how one formal argument is satisfied
///
/// A key present in the table becomes a compiled reference carrying that
/// binding's scope; anything else goes to the [`OnDemandCompiler`].
#[derive(Debug, Clone, Copy)]
pub struct ArgumentResolver<'a> {
    table: &'a BindingTable,
    on_demand: OnDemandCompiler<'a>,
}

impl<'a> ArgumentResolver<'a> {
    /// Create a resolver over `table`
    pub fn new(table: &'a BindingTable, capability: InjectorCapability<'a>) -> Self {
        Self {
            table,
            on_demand: OnDemandCompiler::new(capability),
        }
    }

    /// Expression producing `argument` at runtime
    pub fn resolve(&self, argument: &Argument) -> Result<Expr> {
        match self.table.get(&argument.key) {
            Some(binding) => Ok(Expr::Reference {
                scope: binding.scope(),
                key: argument.key.clone(),
            }),
            None => self.on_demand.compile(argument),
        }
    }

    /// Expressions for `arguments`, in order; the first failure wins
    pub fn resolve_all(&self, arguments: &[Argument]) -> Result<Vec<Expr>> {
        arguments
            .iter()
            .map(|argument| self.resolve(argument))
            .collect()
    }
}
