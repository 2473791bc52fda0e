#![no_main]

use ferrous_injector::{
    print_tree, Args, DiResult, Injectable, Injector, InjectorOptions, Param, ParamType, Resolver,
};
use libfuzzer_sys::fuzz_target;

struct Store;

impl Injectable for Store {
    fn construct(_: Args) -> DiResult<Self> {
        Ok(Store)
    }
}

struct Handler {
    limit: u32,
}

impl Injectable for Handler {
    fn dependencies() -> Vec<ParamType> {
        vec![ParamType::of::<Store>(), ParamType::of::<u32>(), ParamType::of::<String>()]
    }

    fn construct(args: Args) -> DiResult<Self> {
        let _store = args.get::<Store>(0)?;
        let _label = args.get::<String>(2)?;
        Ok(Handler {
            limit: args.value_or(1, 10)?,
        })
    }
}

struct Looping;

impl Injectable for Looping {
    fn dependencies() -> Vec<ParamType> {
        vec![ParamType::of::<Looping>()]
    }

    fn construct(_: Args) -> DiResult<Self> {
        Ok(Looping)
    }
}

fn param(byte: u8) -> Param {
    match byte % 4 {
        0 => Param::Skip,
        1 => Param::value(byte as u32),
        2 => Param::value(format!("p{byte}")),
        _ => Param::value(Store),
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let options = InjectorOptions::default()
        .with_strict(data[0] & 1 == 1)
        .with_max_depth(1 + (data[0] >> 1) as usize);
    let injector = Injector::with_options(options);

    let flags = data[1];
    if flags & 1 == 1 {
        let _ = injector.register::<Store>();
    }
    if flags & 2 == 2 {
        let _ = injector.register::<Handler>();
    }
    if flags & 4 == 4 {
        let _ = injector.register::<Looping>();
    }

    let params: Vec<Param> = data[2..].iter().copied().take(6).map(param).collect();

    // Errors are fine; panics are not
    match flags >> 3 & 3 {
        0 => {
            if let Ok(handler) = injector.resolve_with::<Handler>(&params) {
                let _ = handler.limit;
            }
        }
        1 => {
            let _ = injector.create_with::<Handler>(&params);
        }
        2 => {
            let _ = injector.resolve::<Looping>();
        }
        _ => {
            injector.reset();
            let _ = injector.resolve_target(&params, &[]);
        }
    }

    if let Ok(roots) = injector.roots() {
        let _ = print_tree(&roots, flags & 32 == 32);
    }
});
