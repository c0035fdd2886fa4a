//! Tests for binding unit compilation

use crate::test_utils::*;
use diac_application::{Binder, Module, UnitCompiler};
use diac_domain::ports::{DescriptorIntrospector, InjectorCapability};
use diac_domain::{
    Argument, Binding, BindingTable, CompiledUnit, Dependency, DependencyKey, Expr,
    InjectionPoint, Scope, UnitBody,
};
use serde_json::json;

fn table_for(module: &dyn Module) -> BindingTable {
    Binder::configure_module(&registry(), module).unwrap()
}

fn compile(table: &BindingTable, key: &str) -> CompiledUnit {
    let key = DependencyKey::new(key);
    let binding = table.get(&key).unwrap();
    UnitCompiler::new(table, InjectorCapability::Interpreted, &DescriptorIntrospector)
        .compile(&key, binding)
        .unwrap()
}

#[test]
fn test_car_unit_orders_constructor_setters_and_hook() {
    let table = table_for(&FullModule);
    let unit = compile(&table, CAR);

    assert_eq!(unit.scope, Scope::Prototype);
    let instantiation = unit.instantiation().unwrap();
    assert_eq!(instantiation.class, CAR);
    assert_eq!(
        instantiation.arguments,
        vec![Expr::Reference {
            scope: Scope::Singleton,
            key: DependencyKey::new(ENGINE),
        }]
    );
    let radio = instantiation.setter("set_radio").unwrap();
    assert_eq!(
        radio.arguments,
        vec![Expr::Reference {
            scope: Scope::Prototype,
            key: car_radio(),
        }]
    );
    assert_eq!(instantiation.post_construct.as_deref(), Some("init"));

    let listing = unit.to_string();
    let construct = listing.find("new app::Car(").unwrap();
    let setter = listing.find("instance.set_radio(").unwrap();
    let hook = listing.find("instance.init();").unwrap();
    assert!(construct < setter && setter < hook);
}

#[test]
fn test_optional_setter_with_unbound_argument_is_dropped() {
    let table = table_for(&CarModule);
    let unit = compile(&table, CAR);

    let instantiation = unit.instantiation().unwrap();
    assert!(instantiation.setters.is_empty());
    assert_eq!(instantiation.post_construct.as_deref(), Some("init"));
    assert!(!unit.to_string().contains("set_radio"));
}

#[test]
fn test_required_setter_with_unbound_argument_fails() {
    let table = table_for(&GarageModule { parked: false });
    let key = DependencyKey::new(GARAGE);
    let error = UnitCompiler::new(&table, InjectorCapability::Interpreted, &DescriptorIntrospector)
        .compile(&key, table.get(&key).unwrap())
        .unwrap_err();

    match error {
        diac_domain::Error::Unbound {
            key,
            injection_point,
        } => {
            assert_eq!(key, parked_car());
            assert_eq!(
                injection_point,
                Some(InjectionPoint::new(GARAGE, "set_car", "car"))
            );
        }
        other => panic!("expected Unbound, got {other:?}"),
    }
}

#[test]
fn test_required_setter_is_emitted_when_bound() {
    let table = table_for(&GarageModule { parked: true });
    let unit = compile(&table, GARAGE);
    let setter = unit.instantiation().unwrap().setter("set_car").unwrap();
    assert_eq!(setter.arguments[0].key(), Some(&parked_car()));
}

#[test]
fn test_default_literal_is_embedded_exactly() {
    let table = table_for(&CarModule);
    let unit = compile(&table, ENGINE);

    assert_eq!(unit.scope, Scope::Singleton);
    assert_eq!(
        unit.instantiation().unwrap().arguments,
        vec![Expr::literal(json!(4))]
    );
}

#[test]
fn test_bound_literal_replaces_default() {
    let table = table_for(&FullModule);
    let unit = compile(&table, ENGINE);
    assert_eq!(
        unit.instantiation().unwrap().arguments,
        vec![Expr::Reference {
            scope: Scope::Singleton,
            key: DependencyKey::new(CYLINDERS),
        }]
    );

    let cylinders = compile(&table, CYLINDERS);
    assert_eq!(cylinders.scope, Scope::Singleton);
    assert_eq!(cylinders.body, UnitBody::Instance { value: json!(8) });
}

#[test]
fn test_provider_binding_wraps_provider_instantiation() {
    let table = table_for(&FullModule);
    let unit = compile(&table, CONNECTION);

    match &unit.body {
        UnitBody::Provide { provider, context } => {
            assert_eq!(provider.class, CONNECTION_PROVIDER);
            assert_eq!(context.as_deref(), Some("primary"));
        }
        other => panic!("expected a provider body, got {other:?}"),
    }
    assert!(unit.to_string().contains("return provider.get(\"primary\");"));
}

#[test]
fn test_unbound_optional_setter_becomes_on_demand_under_compiling_injector() {
    let table = table_for(&CarModule);
    let scopes = FixedScopes::new().with(car_radio(), Scope::Singleton);
    let key = DependencyKey::new(CAR);
    let unit = UnitCompiler::new(
        &table,
        InjectorCapability::Compiling(&scopes),
        &DescriptorIntrospector,
    )
    .compile(&key, table.get(&key).unwrap())
    .unwrap();

    let setter = unit.instantiation().unwrap().setter("set_radio").unwrap();
    assert_eq!(
        setter.arguments,
        vec![Expr::OnDemand {
            scope: Scope::Singleton,
            key: car_radio(),
            injection_point: InjectionPoint::new(CAR, "set_radio", "radio"),
        }]
    );
}

#[test]
fn test_descriptor_without_class_metadata_compiles() {
    let key = DependencyKey::new("app::Clock");
    let mut dependency = Dependency {
        class: "app::SystemClock".to_string(),
        scope: Scope::Singleton,
        constructor: Vec::new(),
        setters: Vec::new(),
        post_construct: None,
    };
    dependency.constructor.push(
        Argument::new(
            DependencyKey::new("app::Zone"),
            InjectionPoint::new("app::SystemClock", "new", "zone"),
        )
        .with_default("UTC"),
    );
    let mut table = BindingTable::new();
    table.bind(key.clone(), Binding::Dependency(dependency));

    let unit = compile(&table, "app::Clock");
    assert_eq!(unit.key, key);
    assert_eq!(
        unit.instantiation().unwrap().arguments,
        vec![Expr::literal(json!("UTC"))]
    );
}
