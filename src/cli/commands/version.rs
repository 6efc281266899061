//! Version command implementation.

use serde::Serialize;

use crate::output::OutputContext;

#[derive(Serialize)]
struct VersionOutput<'a> {
    name: &'a str,
    version: &'a str,
    build: &'a str,
}

/// Execute the version command.
pub fn execute(ctx: &OutputContext) {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if ctx.is_json() {
        ctx.json(&VersionOutput {
            name: "tix",
            version,
            build,
        });
        return;
    }

    println!("tix version {version} ({build})");
}
