use anyhow::Context;
use bourse_schema::SchemaRegistry;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::commands::SchemaArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SchemaListResponse {
    schemas: Vec<&'static str>,
}

/// Handle `bourse schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    if args.list {
        return output(
            &SchemaListResponse {
                schemas: registry.list(),
            },
            flags.format,
        );
    }

    let schema = registry.get(&args.name).with_context(|| {
        format!(
            "unknown schema '{}' (available: {})",
            args.name,
            registry.list().join(", ")
        )
    })?;
    output(schema, flags.format)
}

#[cfg(test)]
mod tests {
    use super::handle;
    use crate::cli::commands::SchemaArgs;
    use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            manifest: None,
            quiet: true,
            color: ColorMode::Never,
        }
    }

    #[test]
    fn known_schema_and_list_succeed() {
        let named = SchemaArgs {
            name: "server_decl".to_string(),
            list: false,
        };
        assert!(handle(&named, &flags()).is_ok());

        let list = SchemaArgs {
            name: "manifest".to_string(),
            list: true,
        };
        assert!(handle(&list, &flags()).is_ok());
    }

    #[test]
    fn unknown_schema_names_the_available_ones() {
        let args = SchemaArgs {
            name: "nope".to_string(),
            list: false,
        };
        let err = handle(&args, &flags()).expect_err("unknown schema");
        let message = format!("{err:#}");
        assert!(message.contains("unknown schema 'nope'"));
        assert!(message.contains("manifest"));
    }
}
