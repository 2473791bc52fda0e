use ferrous_injector::{Args, DiError, DiResult, Injectable, Injector, ParamType, Resolver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Config {
    port: u16,
}

impl Injectable for Config {
    fn construct(_: Args) -> DiResult<Self> {
        Ok(Config { port: 8080 })
    }
}

struct Repository {
    config: Arc<Config>,
}

impl Injectable for Repository {
    fn dependencies() -> Vec<ParamType> {
        vec![ParamType::of::<Config>()]
    }

    fn construct(args: Args) -> DiResult<Self> {
        Ok(Repository {
            config: args.required(0)?,
        })
    }
}

struct Server {
    repository: Arc<Repository>,
    config: Arc<Config>,
}

impl Injectable for Server {
    fn dependencies() -> Vec<ParamType> {
        vec![ParamType::of::<Repository>(), ParamType::of::<Config>()]
    }

    fn construct(args: Args) -> DiResult<Self> {
        Ok(Server {
            repository: args.required(0)?,
            config: args.required(1)?,
        })
    }
}

fn injector() -> Injector {
    let injector = Injector::new();
    injector.register::<Config>().unwrap();
    injector.register::<Repository>().unwrap();
    injector.register::<Server>().unwrap();
    injector
}

#[test]
fn test_resolve_returns_same_instance() {
    let injector = injector();

    let a = injector.resolve::<Server>().unwrap();
    let b = injector.resolve::<Server>().unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.config.port, 8080);
}

#[test]
fn test_resolve_caches_whole_chain() {
    let injector = injector();
    let server = injector.resolve::<Server>().unwrap();

    assert_eq!(injector.cached_count(), 3);
    assert!(Arc::ptr_eq(&server.repository, &injector.resolve::<Repository>().unwrap()));
    assert!(Arc::ptr_eq(&server.config, &server.repository.config));
    assert!(Arc::ptr_eq(&server.config, &injector.resolve::<Config>().unwrap()));
}

#[test]
fn test_create_returns_fresh_instance_with_cached_dependencies() {
    let injector = injector();
    let cached = injector.resolve::<Server>().unwrap();

    let fresh1 = injector.create::<Server>().unwrap();
    let fresh2 = injector.create::<Server>().unwrap();

    assert!(!Arc::ptr_eq(&cached, &fresh1));
    assert!(!Arc::ptr_eq(&fresh1, &fresh2));
    assert!(Arc::ptr_eq(&cached.repository, &fresh1.repository));
}

#[test]
fn test_create_does_not_populate_cache() {
    let injector = injector();
    let token = injector.token_of::<Server>().unwrap();

    injector.create::<Server>().unwrap();

    assert!(!injector.is_cached(&token));
    // registered dependencies still go through the singleton path
    assert!(injector.is_cached(&injector.token_of::<Repository>().unwrap()));
}

#[test]
fn test_constructor_runs_once_per_singleton() {
    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    struct Counted;
    impl Injectable for Counted {
        fn construct(_: Args) -> DiResult<Self> {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            Ok(Counted)
        }
    }

    let injector = Injector::new();
    injector.register::<Counted>().unwrap();

    for _ in 0..5 {
        injector.resolve::<Counted>().unwrap();
    }
    assert_eq!(BUILDS.load(Ordering::SeqCst), 1);

    injector.create::<Counted>().unwrap();
    assert_eq!(BUILDS.load(Ordering::SeqCst), 2);
}

#[test]
fn test_unregistered_target_is_built_but_not_cached() {
    let injector = Injector::new();
    injector.register::<Config>().unwrap();

    let a = injector.resolve::<Repository>().unwrap();
    let b = injector.resolve::<Repository>().unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a.config, &b.config));
    assert_eq!(injector.cached_count(), 1);
}

#[test]
fn test_unregistered_dependency_is_left_unset() {
    struct Optional {
        config: Option<Arc<Config>>,
    }

    impl Injectable for Optional {
        fn dependencies() -> Vec<ParamType> {
            vec![ParamType::of::<Config>()]
        }

        fn construct(args: Args) -> DiResult<Self> {
            Ok(Optional {
                config: args.get(0)?,
            })
        }
    }

    let injector = Injector::new();
    injector.register::<Optional>().unwrap();

    let optional = injector.resolve::<Optional>().unwrap();
    assert!(optional.config.is_none());
}

#[test]
fn test_required_unregistered_dependency_fails_in_constructor() {
    let injector = Injector::new();
    injector.register::<Repository>().unwrap();

    assert!(matches!(
        injector.resolve::<Repository>(),
        Err(DiError::MissingArgument { position: 0, .. })
    ));
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let injector = Injector::new();
    let token = injector.register::<Config>().unwrap();

    let err = injector.register::<Config>().unwrap_err();
    assert!(matches!(err, DiError::AlreadyRegistered(_)));
    assert_eq!(injector.len(), 1);
    assert_eq!(injector.token_of::<Config>(), Some(token));
}

#[test]
fn test_tokens_are_unique() {
    let injector = injector();
    let tokens: Vec<_> = injector.descriptors().into_iter().map(|d| d.token).collect();

    assert_eq!(tokens.len(), 3);
    assert_ne!(tokens[0], tokens[1]);
    assert_ne!(tokens[1], tokens[2]);
    assert_ne!(tokens[0], tokens[2]);
    assert!(tokens.iter().all(|t| t.as_str().len() == 11));
}

#[test]
fn test_reset_keeps_registrations() {
    let injector = injector();
    let before = injector.resolve::<Config>().unwrap();
    let token = injector.token_of::<Config>().unwrap();

    injector.reset();

    assert_eq!(injector.cached_count(), 0);
    assert!(!injector.is_cached(&token));
    assert_eq!(injector.token_of::<Config>(), Some(token.clone()));
    assert!(injector.constructor_of(&token).is_some());

    let after = injector.resolve::<Config>().unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert!(injector.is_cached(&token));
}

#[test]
fn test_set_associates_instance() {
    let injector = injector();
    let custom = Arc::new(Config { port: 9000 });

    injector.set(custom.clone()).unwrap();

    let resolved = injector.resolve::<Config>().unwrap();
    assert!(Arc::ptr_eq(&custom, &resolved));
    assert_eq!(injector.resolve::<Server>().unwrap().config.port, 9000);
}

#[test]
fn test_set_requires_registration() {
    let injector = Injector::new();

    let err = injector.set(Arc::new(Config { port: 1 })).unwrap_err();
    assert!(matches!(err, DiError::NotAService(_)));
}

#[test]
fn test_bootstrap_registers_and_resolves() {
    let injector = Injector::new();
    injector.register::<Config>().unwrap();
    injector.register::<Repository>().unwrap();

    let server = injector.bootstrap::<Server>().unwrap();

    assert!(injector.is_registered::<Server>());
    assert!(Arc::ptr_eq(&server, &injector.resolve::<Server>().unwrap()));
    assert!(Arc::ptr_eq(&server, &injector.bootstrap::<Server>().unwrap()));
}

#[test]
fn test_registration_records_source_location() {
    let injector = Injector::new();
    let token = injector.register::<Config>().unwrap();

    let descriptor = injector.descriptor(&token).unwrap();
    let location = descriptor.source_location.unwrap();
    assert!(location.starts_with("tests/basics.rs:"), "{location}");
}

#[test]
fn test_construction_error_propagates() {
    struct Failing;
    impl Injectable for Failing {
        fn construct(_: Args) -> DiResult<Self> {
            Err(DiError::construction::<Failing>("boom"))
        }
    }

    struct Dependent;
    impl Injectable for Dependent {
        fn dependencies() -> Vec<ParamType> {
            vec![ParamType::of::<Failing>()]
        }
        fn construct(_: Args) -> DiResult<Self> {
            Ok(Dependent)
        }
    }

    let injector = Injector::new();
    injector.register::<Failing>().unwrap();
    injector.register::<Dependent>().unwrap();

    match injector.resolve::<Dependent>() {
        Err(DiError::Construction { message, .. }) => assert_eq!(message, "boom"),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
    assert_eq!(injector.cached_count(), 0);
}

#[test]
fn test_nested_singletons_stay_cached_after_failure() {
    struct Good;
    impl Injectable for Good {
        fn construct(_: Args) -> DiResult<Self> {
            Ok(Good)
        }
    }

    struct Bad;
    impl Injectable for Bad {
        fn construct(_: Args) -> DiResult<Self> {
            Err(DiError::construction::<Bad>("unavailable"))
        }
    }

    struct Top;
    impl Injectable for Top {
        fn dependencies() -> Vec<ParamType> {
            vec![ParamType::of::<Good>(), ParamType::of::<Bad>()]
        }
        fn construct(_: Args) -> DiResult<Self> {
            Ok(Top)
        }
    }

    let injector = Injector::new();
    let good = injector.register::<Good>().unwrap();
    let bad = injector.register::<Bad>().unwrap();
    let top = injector.register::<Top>().unwrap();

    assert!(matches!(
        injector.resolve::<Top>().map(|_| ()),
        Err(DiError::Construction { .. })
    ));

    assert_eq!(injector.cached_count(), 1);
    assert!(injector.is_cached(&good));
    assert!(!injector.is_cached(&bad));
    assert!(!injector.is_cached(&top));
}
