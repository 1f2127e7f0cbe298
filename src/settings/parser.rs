//! Line-oriented settings parser.
//!
//! Parsing is a pure transition function over a small closed set of
//! categories: `step(category, line) -> (category, effect)`. The caller
//! decides what an effect means (master vs. project file, glob expansion,
//! registry updates), which keeps the category rules testable without I/O.
//!
//! Rules:
//! - A header line (`[Name]`) switches category. Names match
//!   case-insensitively; unknown names fall back to `General`.
//! - Inside a template category every line is taken verbatim, untrimmed and
//!   including comments, until a line that *starts* with `[`.
//! - Elsewhere lines are trimmed; empty lines and `#` comments are skipped,
//!   except that `# key = value` inside `[Packages]` records an unused package.

use crate::core::package::PackageName;

/// A settings-file section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    General,
    Packages,
    ExtraFiles,
    Template(TemplateKind),
}

/// The three raw template bodies used when scaffolding a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Console,
    Gui,
    Lib,
}

impl TemplateKind {
    /// Header name of this template's section.
    pub fn section_name(&self) -> &'static str {
        match self {
            TemplateKind::Console => "AppTemplate",
            TemplateKind::Gui => "GUITemplate",
            TemplateKind::Lib => "LibTemplate",
        }
    }
}

impl Category {
    /// Map a header name (without brackets) to its category.
    pub fn from_header_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "packages" => Category::Packages,
            "extrafiles" => Category::ExtraFiles,
            "apptemplate" => Category::Template(TemplateKind::Console),
            "guitemplate" => Category::Template(TemplateKind::Gui),
            "libtemplate" => Category::Template(TemplateKind::Lib),
            _ => Category::General,
        }
    }

    /// Whether entering this category discards what it accumulated before.
    pub fn resets_on_entry(&self) -> bool {
        !matches!(self, Category::General)
    }
}

/// What a single line asks the reader to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<'a> {
    /// Nothing: blank line, comment, or malformed entry.
    None,
    /// A header was read; `Category::resets_on_entry` says whether to reset.
    Enter(Category),
    /// A raw template line, line terminator included.
    TemplateLine(TemplateKind, &'a str),
    /// A glob pattern from `[ExtraFiles]`.
    ExtraPattern(&'a str),
    /// A `key = value` entry in `[General]`; the key is lower-cased.
    General { key: String, value: &'a str },
    /// An active `Name = id` entry in `[Packages]`.
    Package { name: PackageName, resolver_id: &'a str },
    /// A commented `# Name = id` entry in `[Packages]`.
    UnusedPackage { name: PackageName, resolver_id: &'a str },
}

/// Header name when `line` (already trimmed as appropriate) is a header.
///
/// A `[` without a closing `]` is a header-shaped line that names nothing.
fn header_name(line: &str) -> Option<Option<&str>> {
    let rest = line.strip_prefix('[')?;
    Some(rest.find(']').map(|end| &rest[..end]))
}

/// Split `key = value` at the first `=`, trimming both sides.
pub fn split_entry(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Advance the parser by one raw line (terminator included or not).
pub fn step(category: Category, raw: &str) -> (Category, Effect<'_>) {
    if let Category::Template(kind) = category {
        return match header_name(raw) {
            Some(Some(name)) => {
                let next = Category::from_header_name(name);
                (next, Effect::Enter(next))
            }
            Some(None) => (category, Effect::None),
            None => (category, Effect::TemplateLine(kind, raw)),
        };
    }

    let line = raw.trim();
    if line.is_empty() {
        return (category, Effect::None);
    }

    match header_name(line) {
        Some(Some(name)) => {
            let next = Category::from_header_name(name);
            return (next, Effect::Enter(next));
        }
        Some(None) => return (category, Effect::None),
        None => {}
    }

    if let Some(comment) = line.strip_prefix('#') {
        if category == Category::Packages {
            let entry = comment.trim_start_matches(|c: char| c == '#' || c.is_whitespace());
            if let Some((key, value)) = split_entry(entry) {
                return (
                    category,
                    Effect::UnusedPackage {
                        name: PackageName::new(key),
                        resolver_id: value,
                    },
                );
            }
        }
        return (category, Effect::None);
    }

    let effect = match category {
        Category::ExtraFiles => Effect::ExtraPattern(line),
        Category::General => match split_entry(line) {
            Some((key, value)) => Effect::General {
                key: key.to_lowercase(),
                value,
            },
            None => Effect::None,
        },
        Category::Packages => match split_entry(line) {
            Some((key, value)) => Effect::Package {
                name: PackageName::new(key),
                resolver_id: value,
            },
            None => Effect::None,
        },
        Category::Template(kind) => Effect::TemplateLine(kind, raw),
    };
    (category, effect)
}

/// Run `step` over every line of `text`, starting in `General`.
///
/// Line terminators are preserved so template bodies round-trip verbatim.
pub fn parse(text: &str) -> Vec<Effect<'_>> {
    let mut category = Category::General;
    let mut effects = Vec::new();
    for raw in text.split_inclusive('\n') {
        let (next, effect) = step(category, raw);
        category = next;
        if effect != Effect::None {
            effects.push(effect);
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_transitions() {
        assert_eq!(
            step(Category::General, "[Packages]"),
            (Category::Packages, Effect::Enter(Category::Packages))
        );
        assert_eq!(
            step(Category::Packages, "  [extrafiles]  "),
            (Category::ExtraFiles, Effect::Enter(Category::ExtraFiles))
        );
        assert_eq!(
            step(Category::ExtraFiles, "[Whatever]").0,
            Category::General
        );
        assert_eq!(
            step(Category::General, "[GuiTemplate]").0,
            Category::Template(TemplateKind::Gui)
        );
    }

    #[test]
    fn test_unterminated_header_keeps_category() {
        assert_eq!(
            step(Category::Packages, "[Packages"),
            (Category::Packages, Effect::None)
        );
    }

    #[test]
    fn test_general_entries() {
        assert_eq!(
            step(Category::General, "AppName = hello\n").1,
            Effect::General {
                key: "appname".to_string(),
                value: "hello"
            }
        );
        assert_eq!(step(Category::General, "no equals sign").1, Effect::None);
        assert_eq!(step(Category::General, "# appname = x").1, Effect::None);
    }

    #[test]
    fn test_package_entries() {
        assert_eq!(
            step(Category::Packages, "gtk = gtk4\n").1,
            Effect::Package {
                name: PackageName::new("Gtk"),
                resolver_id: "gtk4"
            }
        );
        assert_eq!(
            step(Category::Packages, "#  gee = gee-0.8").1,
            Effect::UnusedPackage {
                name: PackageName::new("Gee"),
                resolver_id: "gee-0.8"
            }
        );
        assert_eq!(step(Category::Packages, "# just a remark").1, Effect::None);
    }

    #[test]
    fn test_extra_patterns() {
        assert_eq!(
            step(Category::ExtraFiles, "  docs/*.txt \n").1,
            Effect::ExtraPattern("docs/*.txt")
        );
        assert_eq!(step(Category::ExtraFiles, "# docs").1, Effect::None);
    }

    #[test]
    fn test_template_lines_are_raw() {
        let kind = TemplateKind::Console;
        let state = Category::Template(kind);
        assert_eq!(
            step(state, "    // keep # and spacing\n"),
            (state, Effect::TemplateLine(kind, "    // keep # and spacing\n"))
        );
        assert_eq!(step(state, "\n").1, Effect::TemplateLine(kind, "\n"));
        // Indented brackets are code, not headers.
        assert_eq!(
            step(state, "    [CCode (cname = \"x\")]\n").1,
            Effect::TemplateLine(kind, "    [CCode (cname = \"x\")]\n")
        );
        assert_eq!(step(state, "[Packages]\n").0, Category::Packages);
    }

    #[test]
    fn test_parse_whole_file() {
        let text = "[General]\nwinmsys2 = D:/msys64\n\n[AppTemplate]\nline one\n\n[Packages]\nGee = gee-0.8\n";
        let effects = parse(text);
        assert_eq!(
            effects,
            vec![
                Effect::Enter(Category::General),
                Effect::General {
                    key: "winmsys2".to_string(),
                    value: "D:/msys64"
                },
                Effect::Enter(Category::Template(TemplateKind::Console)),
                Effect::TemplateLine(TemplateKind::Console, "line one\n"),
                Effect::TemplateLine(TemplateKind::Console, "\n"),
                Effect::Enter(Category::Packages),
                Effect::Package {
                    name: PackageName::new("Gee"),
                    resolver_id: "gee-0.8"
                },
            ]
        );
    }

    #[test]
    fn test_split_entry_at_first_equals() {
        assert_eq!(split_entry("a = b = c"), Some(("a", "b = c")));
        assert_eq!(split_entry("  compiler=valac "), Some(("compiler", "valac")));
        assert_eq!(split_entry(" = x"), None);
        assert_eq!(split_entry("no entry"), None);
    }
}
