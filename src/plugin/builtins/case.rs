use anyhow::Result;

use crate::plugin::contract::{Bundle, Plugin};

/// Uppercase the file name and/or extension of every target.
pub struct ToUpperCase;

/// Lowercase the file name and/or extension of every target.
pub struct ToLowerCase;

impl Plugin for ToUpperCase {
    fn apply(&self, bundle: Bundle<'_>) -> Result<()> {
        recase(bundle, str::to_uppercase)
    }
}

impl Plugin for ToLowerCase {
    fn apply(&self, bundle: Bundle<'_>) -> Result<()> {
        recase(bundle, str::to_lowercase)
    }
}

/// Shared body of the two case plugins. Each item is handled independently:
/// the basename splits into name (before the last dot) and extension (from
/// the last dot), each half is transformed only when its option is set, and
/// the parent directory is carried over verbatim.
fn recase(bundle: Bundle<'_>, transform: fn(&str) -> String) -> Result<()> {
    let include_name = bundle.options.get_bool("includeName")?;
    let include_extension = bundle.options.get_bool("includeExtension")?;
    let path = bundle.path;

    for target_item in bundle.target_items.iter_mut() {
        let target_path = target_item.target_path.clone();
        let base_name = path.basename(&target_path);
        if base_name.is_empty() {
            continue;
        }
        let parent_path = path.dirname(&target_path);
        let ext = path.extname(&target_path);
        let name = &base_name[..base_name.len() - ext.len()];

        let new_name = if include_name {
            transform(name)
        } else {
            name.to_string()
        };
        let new_ext = if include_extension {
            transform(ext)
        } else {
            ext.to_string()
        };

        target_item.target_path = path.join(&[parent_path, &format!("{new_name}{new_ext}")]);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::plugin::builtins::testing::check;

    #[test]
    fn upper_name_only() {
        let options = &[("includeName", "true"), ("includeExtension", "false")];
        check("To UPPER CASE", None, None, options);
        check(
            "To UPPER CASE",
            Some("/test/a b c.x"),
            Some("/test/A B C.x"),
            options,
        );
        check(
            "To UPPER CASE",
            Some("/test/A B C.x"),
            Some("/test/A B C.x"),
            options,
        );
        check(
            "To UPPER CASE",
            Some("/test/A B C.X"),
            Some("/test/A B C.X"),
            options,
        );
        check(
            "To UPPER CASE",
            Some("/test/AaA BbB CcC.X"),
            Some("/test/AAA BBB CCC.X"),
            options,
        );
    }

    #[test]
    fn upper_name_and_extension() {
        let options = &[("includeName", "true"), ("includeExtension", "true")];
        check("To UPPER CASE", None, None, options);
        check(
            "To UPPER CASE",
            Some("/test/a b c.x"),
            Some("/test/A B C.X"),
            options,
        );
        check(
            "To UPPER CASE",
            Some("/test/A B C.x"),
            Some("/test/A B C.X"),
            options,
        );
        check(
            "To UPPER CASE",
            Some("/test/AaA BbB CcC.x"),
            Some("/test/AAA BBB CCC.X"),
            options,
        );
    }

    #[test]
    fn upper_nothing_selected() {
        let options = &[("includeName", "false"), ("includeExtension", "false")];
        check("To UPPER CASE", None, None, options);
        check(
            "To UPPER CASE",
            Some("/test/a b c.x"),
            Some("/test/a b c.x"),
            options,
        );
        check(
            "To UPPER CASE",
            Some("/test/A B C.X"),
            Some("/test/A B C.X"),
            options,
        );
        check(
            "To UPPER CASE",
            Some("/test/AaA BbB CcC.X"),
            Some("/test/AaA BbB CcC.X"),
            options,
        );
    }

    #[test]
    fn upper_extension_only() {
        let options = &[("includeName", "false"), ("includeExtension", "true")];
        check("To UPPER CASE", None, None, options);
        check(
            "To UPPER CASE",
            Some("/test/a b c.x"),
            Some("/test/a b c.X"),
            options,
        );
        check(
            "To UPPER CASE",
            Some("/test/A B C.x"),
            Some("/test/A B C.X"),
            options,
        );
        check(
            "To UPPER CASE",
            Some("/test/AaA BbB CcC.X"),
            Some("/test/AaA BbB CcC.X"),
            options,
        );
    }

    #[test]
    fn lower_name_only() {
        let options = &[("includeName", "true"), ("includeExtension", "false")];
        check("To lower case", None, None, options);
        check(
            "To lower case",
            Some("/test/a b c.x"),
            Some("/test/a b c.x"),
            options,
        );
        check(
            "To lower case",
            Some("/test/A B C.x"),
            Some("/test/a b c.x"),
            options,
        );
        check(
            "To lower case",
            Some("/test/A B C.X"),
            Some("/test/a b c.X"),
            options,
        );
        check(
            "To lower case",
            Some("/test/AaA BbB CcC.X"),
            Some("/test/aaa bbb ccc.X"),
            options,
        );
    }

    #[test]
    fn lower_name_and_extension() {
        let options = &[("includeName", "true"), ("includeExtension", "true")];
        check("To lower case", None, None, options);
        check(
            "To lower case",
            Some("/test/A B C.X"),
            Some("/test/a b c.x"),
            options,
        );
        check(
            "To lower case",
            Some("/test/AaA BbB CcC.X"),
            Some("/test/aaa bbb ccc.x"),
            options,
        );
    }

    #[test]
    fn lower_extension_only() {
        let options = &[("includeName", "false"), ("includeExtension", "true")];
        check("To lower case", None, None, options);
        check(
            "To lower case",
            Some("/test/A B C.X"),
            Some("/test/A B C.x"),
            options,
        );
        check(
            "To lower case",
            Some("/test/AaA BbB CcC.X"),
            Some("/test/AaA BbB CcC.x"),
            options,
        );
    }

    #[test]
    fn lower_nothing_selected() {
        let options = &[("includeName", "false"), ("includeExtension", "false")];
        check("To lower case", None, None, options);
        check(
            "To lower case",
            Some("/test/A B C.X"),
            Some("/test/A B C.X"),
            options,
        );
        check(
            "To lower case",
            Some("/test/AaA BbB CcC.X"),
            Some("/test/AaA BbB CcC.X"),
            options,
        );
    }

    #[test]
    fn case_defaults_touch_name_only() {
        // Declared defaults: includeName = true, includeExtension = false.
        check(
            "To UPPER CASE",
            Some("/test/abc.x"),
            Some("/test/ABC.x"),
            &[],
        );
        check(
            "To lower case",
            Some("/test/ABC.X"),
            Some("/test/abc.X"),
            &[],
        );
    }

    #[test]
    fn extension_free_name_has_no_hidden_extension() {
        check(
            "To UPPER CASE",
            Some("/test/abc"),
            Some("/test/ABC"),
            &[("includeName", "true"), ("includeExtension", "true")],
        );
    }
}
