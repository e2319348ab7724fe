//! Configuration templates for `sift init`.
//!
//! The templates are valid TOML and are handed out commented out, so a new
//! file changes nothing until its lines are uncommented.

/// Template for a project `.sift.toml`.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Template for `~/.sift.toml`.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the project template, commented out.
pub fn local_template() -> String {
    comment_out(LOCAL_TEMPLATE)
}

/// Returns the global template, commented out.
pub fn global_template() -> String {
    comment_out(GLOBAL_TEMPLATE)
}

/// Prefixes every non-empty, non-comment line with `# `.
fn comment_out(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    #[test]
    fn templates_are_valid_config() {
        let local = parse_config(LOCAL_TEMPLATE).unwrap();
        assert_eq!(local.root, Some(true));
        assert!(local.parser.is_some());
        assert!(local.analysis.is_some());

        let global = parse_config(GLOBAL_TEMPLATE).unwrap();
        assert_eq!(global.parser.unwrap().lenient, Some(true));
    }

    #[test]
    fn commented_templates_set_nothing() {
        for template in [local_template(), global_template()] {
            let parsed = parse_config(&template).unwrap();
            assert!(parsed.root.is_none());
            assert!(parsed.parser.is_none());
            assert!(parsed.analysis.is_none());
        }
    }

    #[test]
    fn comment_out_keeps_comments_and_blank_lines() {
        assert_eq!(
            comment_out("# note\n\n[parser]\nclean = true\n"),
            "# note\n\n# [parser]\n# clean = true\n"
        );
    }
}
