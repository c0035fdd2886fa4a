//! Classes shared by the suites
//!
//! ```text
//! Car ──new(engine)──▶ Engine ──new(cylinders = 4)──▶ app::Cylinders
//!  ├─ set_radio(radio)     optional, app::Radio#car
//!  └─ init()               post-construct
//! Garage ──set_car(car)    required, app::Car#parked
//! Repository ──new(connection)──▶ Connection ◀── ConnectionProvider
//! A ──new(b)──▶ B          B is never bound explicitly
//! Chicken ──▶ Egg ──▶ Chicken
//! ```
//!
//! Named keys are never bound just in time, so `Radio#car` and `Car#parked`
//! stay unbound unless a module binds them.

use diac_application::{Binder, ClassDefinition, ClassRegistry, Module, Param};
use diac_domain::error::Result;
use diac_domain::{DependencyKey, Scope, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const CAR: &str = "app::Car";
pub const ENGINE: &str = "app::Engine";
pub const CYLINDERS: &str = "app::Cylinders";
pub const RADIO: &str = "app::Radio";
pub const GARAGE: &str = "app::Garage";
pub const CONNECTION: &str = "app::Connection";
pub const CONNECTION_PROVIDER: &str = "app::ConnectionProvider";
pub const REPOSITORY: &str = "app::Repository";
pub const A: &str = "app::A";
pub const B: &str = "app::B";
pub const CHICKEN: &str = "app::Chicken";
pub const EGG: &str = "app::Egg";

/// Key of the car's radio
pub fn car_radio() -> DependencyKey {
    DependencyKey::named(RADIO, "car")
}

/// Key of the garage's car
pub fn parked_car() -> DependencyKey {
    DependencyKey::named(CAR, "parked")
}

static ENGINES_BUILT: AtomicUsize = AtomicUsize::new(0);

pub struct Engine {
    pub cylinders: i64,
    pub serial: usize,
}

pub struct Radio {
    pub station: String,
}

pub struct Car {
    pub engine: Arc<Engine>,
    pub radio: Option<Arc<Radio>>,
    pub initialized: bool,
}

pub struct Garage {
    pub car: Option<Arc<Car>>,
}

pub struct ConnectionProvider {
    pub url: String,
}

pub struct Repository {
    pub connection: String,
}

pub struct B {}

pub struct Chicken;

pub struct Egg;

pub struct A {
    pub b: Arc<B>,
}

fn car_definition() -> ClassDefinition<Car> {
    ClassDefinition::new(CAR, |args| {
        Ok(Car {
            engine: args.object::<Engine>(0)?,
            radio: None,
            initialized: false,
        })
    })
    .constructor_param(Param::new("engine", ENGINE))
    .optional_setter("set_radio", vec![Param::new("radio", car_radio())], |car, args| {
        car.radio = Some(args.object::<Radio>(0)?);
        Ok(())
    })
    .post_construct("init", |car| {
        car.initialized = true;
        Ok(())
    })
}

/// Registry with every fixture class
pub fn registry() -> ClassRegistry {
    let mut classes = ClassRegistry::new();
    classes
        .register(car_definition())
        .register(
            ClassDefinition::new(ENGINE, |args| {
                Ok(Engine {
                    cylinders: args.i64(0)?,
                    serial: ENGINES_BUILT.fetch_add(1, Ordering::SeqCst),
                })
            })
            .constructor_param(Param::new("cylinders", CYLINDERS).with_default(4)),
        )
        .register(ClassDefinition::new(RADIO, |_| {
            Ok(Radio {
                station: "fm".to_string(),
            })
        }))
        .register(
            ClassDefinition::new(GARAGE, |_| Ok(Garage { car: None })).setter(
                "set_car",
                vec![Param::new("car", parked_car())],
                |garage, args| {
                    garage.car = Some(args.object::<Car>(0)?);
                    Ok(())
                },
            ),
        )
        .register(
            ClassDefinition::new(CONNECTION_PROVIDER, |_| {
                Ok(ConnectionProvider {
                    url: "db://local".to_string(),
                })
            })
            .provides(|provider, context| {
                let requester = context
                    .injection_point
                    .map(|point| point.declaring_type.clone())
                    .unwrap_or_else(|| "-".to_string());
                Ok(Value::literal(format!(
                    "{}:{}:{}",
                    provider.url,
                    context.context.unwrap_or("-"),
                    requester
                )))
            }),
        )
        .register(
            ClassDefinition::new(REPOSITORY, |args| {
                Ok(Repository {
                    connection: args.str(0)?.to_string(),
                })
            })
            .constructor_param(Param::new("connection", CONNECTION)),
        )
        .register(ClassDefinition::new(B, |_| Ok(B {})))
        .register(
            ClassDefinition::new(A, |args| Ok(A { b: args.object::<B>(0)? }))
                .constructor_param(Param::new("b", B)),
        )
        .register(
            ClassDefinition::new(CHICKEN, |args| {
                args.object::<Egg>(0)?;
                Ok(Chicken)
            })
            .constructor_param(Param::new("egg", EGG)),
        )
        .register(
            ClassDefinition::new(EGG, |args| {
                args.object::<Chicken>(0)?;
                Ok(Egg)
            })
            .constructor_param(Param::new("chicken", CHICKEN)),
        );
    classes
}

/// Car with a singleton engine; radio and cylinders left unbound
pub struct CarModule;

impl Module for CarModule {
    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        binder.bind(CAR).to_self()?;
        binder.bind(ENGINE).in_scope(Scope::Singleton).to_self()?;
        Ok(())
    }
}

/// Everything in [`CarModule`] plus the car radio, eight cylinders and a
/// repository fed by a provider
pub struct FullModule;

impl Module for FullModule {
    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        binder.install(&CarModule)?;
        binder.bind(RADIO).named("car").to(RADIO)?;
        binder.bind(CYLINDERS).to_instance(8);
        binder.bind(REPOSITORY).to_self()?;
        binder
            .bind(CONNECTION)
            .to_provider_with_context(CONNECTION_PROVIDER, "primary")?;
        Ok(())
    }
}

/// A garage, optionally with its parked car bound
pub struct GarageModule {
    pub parked: bool,
}

impl Module for GarageModule {
    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        binder.install(&CarModule)?;
        binder.bind(GARAGE).to_self()?;
        if self.parked {
            binder.bind(CAR).named("parked").to_self()?;
        }
        Ok(())
    }
}

/// Binds only A; B is discovered at runtime
pub struct AModule;

impl Module for AModule {
    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        binder.bind(A).to_self()
    }
}
