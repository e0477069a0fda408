// pydantic-gen-core/src/infrastructure/formats/ini.rs
//
// INI reader/writer with Python `configparser` semantics: case preserving keys,
// `=` or `:` delimiters, indented continuation lines, a DEFAULT section that
// feeds every other section, and `%(name)s` interpolation.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::domain::value::{ConfigValue, IniSection};
use crate::infrastructure::error::IniError;

pub const DEFAULT_SECTION: &str = "DEFAULT";
const MAX_INTERPOLATION_DEPTH: usize = 10;

fn re_section() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\[(?P<header>.+)\]").unwrap_or_else(|_| unreachable!())
    })
}

fn re_option() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<option>.*?)\s*(?P<vi>[=:])\s*(?P<value>.*)$")
            .unwrap_or_else(|_| unreachable!())
    })
}

fn re_reference() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^%\(([^)]+)\)s").unwrap_or_else(|_| unreachable!()))
}

#[derive(Debug, Clone, Default)]
struct RawSection {
    name: String,
    options: Vec<(String, Vec<String>)>,
}

impl RawSection {
    fn lines_mut(&mut self, option: &str) -> Option<&mut Vec<String>> {
        self.options
            .iter_mut()
            .find(|(k, _)| k == option)
            .map(|(_, v)| v)
    }
}

#[derive(Debug, Clone, Copy)]
enum Cursor {
    Defaults,
    Section(usize),
}

/// A parsed INI file, values still raw (not interpolated).
#[derive(Debug, Clone, Default)]
pub struct IniFile {
    defaults: Vec<(String, String)>,
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl IniFile {
    pub fn parse(content: &str) -> Result<Self, IniError> {
        let mut defaults = RawSection {
            name: DEFAULT_SECTION.to_string(),
            options: Vec::new(),
        };
        let mut sections: Vec<RawSection> = Vec::new();
        let mut added: HashSet<(String, String)> = HashSet::new();
        let mut added_sections: HashSet<String> = HashSet::new();

        let mut cursor: Option<Cursor> = None;
        let mut optname: Option<String> = None;
        let mut indent_level = 0usize;

        for (idx, line) in content.lines().enumerate() {
            let lineno = idx + 1;
            let stripped = line.trim();
            let is_comment = stripped.starts_with('#') || stripped.starts_with(';');

            if stripped.is_empty() || is_comment {
                // a blank line may be part of a multi-line value
                if !is_comment
                    && let (Some(c), Some(opt)) = (cursor, optname.as_deref())
                {
                    let section = match c {
                        Cursor::Defaults => &mut defaults,
                        Cursor::Section(i) => &mut sections[i],
                    };
                    if let Some(lines) = section.lines_mut(opt) {
                        lines.push(String::new());
                    }
                }
                continue;
            }

            let cur_indent_level = line.len() - line.trim_start().len();

            if let (Some(c), Some(opt)) = (cursor, optname.as_deref())
                && cur_indent_level > indent_level
            {
                let section = match c {
                    Cursor::Defaults => &mut defaults,
                    Cursor::Section(i) => &mut sections[i],
                };
                if let Some(lines) = section.lines_mut(opt) {
                    lines.push(stripped.to_string());
                }
                continue;
            }

            indent_level = cur_indent_level;

            if let Some(caps) = re_section().captures(stripped) {
                let header = caps["header"].to_string();
                if header == DEFAULT_SECTION {
                    cursor = Some(Cursor::Defaults);
                } else if let Some(pos) = sections.iter().position(|s| s.name == header) {
                    if added_sections.contains(&header) {
                        return Err(IniError::DuplicateSection {
                            section: header,
                            line: lineno,
                        });
                    }
                    cursor = Some(Cursor::Section(pos));
                } else {
                    sections.push(RawSection {
                        name: header.clone(),
                        options: Vec::new(),
                    });
                    cursor = Some(Cursor::Section(sections.len() - 1));
                }
                added_sections.insert(header);
                optname = None;
                continue;
            }

            let Some(c) = cursor else {
                return Err(IniError::MissingSectionHeader {
                    line: lineno,
                    content: line.to_string(),
                });
            };

            let Some(caps) = re_option().captures(stripped) else {
                return Err(IniError::InvalidLine {
                    line: lineno,
                    content: line.to_string(),
                });
            };
            let option = caps["option"].trim_end().to_string();
            if option.is_empty() {
                return Err(IniError::EmptyOptionName { line: lineno });
            }
            let value = caps["value"].trim().to_string();

            let section = match c {
                Cursor::Defaults => &mut defaults,
                Cursor::Section(i) => &mut sections[i],
            };
            if !added.insert((section.name.clone(), option.clone())) {
                return Err(IniError::DuplicateOption {
                    section: section.name.clone(),
                    option,
                    line: lineno,
                });
            }
            match section.lines_mut(&option) {
                Some(lines) => *lines = vec![value],
                None => section.options.push((option.clone(), vec![value])),
            }
            optname = Some(option);
        }

        Ok(IniFile {
            defaults: join_values(defaults),
            sections: sections
                .into_iter()
                .map(|s| (s.name.clone(), join_values(s)))
                .collect(),
        })
    }

    /// Sections in file order, DEFAULT merged in and values interpolated.
    /// Section keys come first, then the defaults the section does not set.
    pub fn sections(&self) -> Result<Vec<IniSection>, IniError> {
        let mut out = Vec::with_capacity(self.sections.len());
        for (name, options) in &self.sections {
            let mut merged = options.clone();
            for (key, value) in &self.defaults {
                if !merged.iter().any(|(k, _)| k == key) {
                    merged.push((key.clone(), value.clone()));
                }
            }

            let mut entries = Vec::with_capacity(merged.len());
            for (key, raw) in &merged {
                let value = interpolate(name, key, raw, &merged, 1)?;
                entries.push((key.clone(), value));
            }
            out.push(IniSection {
                name: name.clone(),
                entries,
            });
        }
        Ok(out)
    }
}

fn join_values(section: RawSection) -> Vec<(String, String)> {
    section
        .options
        .into_iter()
        .map(|(k, lines)| (k, lines.join("\n").trim_end().to_string()))
        .collect()
}

fn interpolate(
    section: &str,
    option: &str,
    raw: &str,
    vars: &[(String, String)],
    depth: usize,
) -> Result<String, IniError> {
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(IniError::InterpolationDepth {
            section: section.to_string(),
            option: option.to_string(),
        });
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while !rest.is_empty() {
        let Some(p) = rest.find('%') else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..p]);
        rest = &rest[p..];

        if rest[1..].starts_with('%') {
            out.push('%');
            rest = &rest[2..];
        } else if rest[1..].starts_with('(') {
            let Some(caps) = re_reference().captures(rest) else {
                return Err(IniError::Interpolation {
                    section: section.to_string(),
                    option: option.to_string(),
                    reason: "bad interpolation variable reference".to_string(),
                });
            };
            let var = caps[1].to_string();
            let end = caps.get(0).map_or(rest.len(), |m| m.end());
            rest = &rest[end..];

            let Some((_, value)) = vars.iter().find(|(k, _)| *k == var) else {
                return Err(IniError::Interpolation {
                    section: section.to_string(),
                    option: option.to_string(),
                    reason: format!("no option '{}' to substitute", var),
                });
            };
            if value.contains('%') {
                out.push_str(&interpolate(section, option, value, vars, depth + 1)?);
            } else {
                out.push_str(value);
            }
        } else {
            return Err(IniError::Interpolation {
                section: section.to_string(),
                option: option.to_string(),
                reason: format!("'%' must be followed by '%' or '(', found: {:?}", rest),
            });
        }
    }
    Ok(out)
}

/// Writes a mapping of sections as an INI file.
pub fn write_ini(document: &ConfigValue) -> Result<String, IniError> {
    let Some(sections) = document.as_mapping() else {
        return Err(IniError::NotASection(document.kind().to_string()));
    };

    let mut out = String::new();
    for (name, section) in sections {
        let Some(entries) = section.as_mapping() else {
            return Err(IniError::NotASection(name.clone()));
        };
        out.push_str(&format!("[{}]\n", name));
        for (key, value) in entries {
            // `%` starts an interpolation when the file is read again
            let text = ini_value(value).replace('%', "%%").replace('\n', "\n\t");
            out.push_str(&format!("{} = {}\n", key, text));
        }
        out.push('\n');
    }
    Ok(out)
}

fn ini_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Null => String::new(),
        ConfigValue::Bool(b) => b.to_string(),
        ConfigValue::Integer(i) => i.to_string(),
        ConfigValue::Float(f) => format!("{:?}", f),
        ConfigValue::String(s) => s.clone(),
        nested @ (ConfigValue::List(_) | ConfigValue::Mapping(_)) => {
            serde_json::to_string(nested).unwrap_or_default()
        }
    }
}
