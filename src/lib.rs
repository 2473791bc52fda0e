//! # ferrous-injector
//!
//! Runtime dependency injection with token-addressed singletons and
//! dependency-tree introspection.
//!
//! ## Features
//!
//! - **Token registry**: every registered type gets a unique string token
//! - **Singleton cache**: `resolve` builds a service once and reuses it
//! - **Fresh instances**: `create` builds a new instance every time
//! - **Explicit parameters**: positional overrides at the call site
//! - **Cycle detection**: circular graphs fail with the full path
//! - **Tree introspection**: print the declared dependency graph
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_injector::{Args, DiResult, Injectable, Injector, Param, ParamType, Resolver};
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! impl Injectable for Database {
//!     fn construct(_: Args) -> DiResult<Self> {
//!         Ok(Database { url: "postgres://localhost".to_string() })
//!     }
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//!     page_size: u32,
//! }
//!
//! impl Injectable for UserService {
//!     fn dependencies() -> Vec<ParamType> {
//!         vec![ParamType::of::<Database>(), ParamType::of::<u32>()]
//!     }
//!
//!     fn construct(args: Args) -> DiResult<Self> {
//!         Ok(UserService {
//!             db: args.required(0)?,
//!             page_size: args.value_or(1, 20)?,
//!         })
//!     }
//! }
//!
//! let injector = Injector::new();
//! injector.register::<Database>().unwrap();
//! injector.register::<UserService>().unwrap();
//!
//! // Singletons
//! let users = injector.resolve::<UserService>().unwrap();
//! assert_eq!(users.db.url, "postgres://localhost");
//! assert_eq!(users.page_size, 20);
//! assert!(Arc::ptr_eq(&users, &injector.resolve::<UserService>().unwrap()));
//!
//! // Fresh instances with an explicit parameter
//! let paged = injector.create_with::<UserService>(&[Param::Skip, Param::value(50u32)]).unwrap();
//! assert_eq!(paged.page_size, 50);
//! assert!(Arc::ptr_eq(&paged.db, &users.db));
//! ```
//!
//! ## Dependency Trees
//!
//! ```rust
//! use ferrous_injector::{print_tree, Args, DiResult, Injectable, Injector, ParamType};
//!
//! struct Repo;
//! impl Injectable for Repo {
//!     fn construct(_: Args) -> DiResult<Self> { Ok(Repo) }
//! }
//!
//! struct Cache;
//! impl Injectable for Cache {
//!     fn construct(_: Args) -> DiResult<Self> { Ok(Cache) }
//! }
//!
//! struct Api;
//! impl Injectable for Api {
//!     fn dependencies() -> Vec<ParamType> {
//!         vec![ParamType::of::<Repo>(), ParamType::of::<Cache>()]
//!     }
//!     fn construct(_: Args) -> DiResult<Self> { Ok(Api) }
//! }
//!
//! let injector = Injector::new();
//! injector.register::<Repo>().unwrap();
//! injector.register::<Cache>().unwrap();
//! injector.register::<Api>().unwrap();
//!
//! let tree = injector.tree::<Api>().unwrap();
//! assert_eq!(print_tree(&tree, false), vec!["Api", "├ Repo", "└ Cache"]);
//! ```

// Module declarations
pub mod config;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod params;
pub mod token;
pub mod traits;
pub mod tree;

mod cache;
mod global;
mod injector;

// Internal modules
mod internal;
mod registration;

// Re-export core types
pub use config::InjectorOptions;
pub use descriptors::ServiceDescriptor;
pub use error::{DiError, DiResult};
pub use global::global;
pub use injector::Injector;
pub use key::{key_of_type, TypeKey};
pub use params::{Args, Instance, Param};
pub use token::Token;
pub use traits::{downcast, Constructor, Injectable, ParamType, Resolver, ResolverCore};
pub use tree::{print_tree, DependencyNode, TreeRender};
