use super::{warning_result::WarningResult, InstanceReader, WarningHandler};
use crate::aa::{AAFramework, Argument};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::io::{BufRead, BufReader, Read};

const ARG_AND_SPACE_PATTERN: &str = r"\s*[_[:alnum:]]+\s*";

lazy_static! {
    static ref ARG_LINE_PATTERN: Regex = Regex::new(r"^\s*arg\([^)]+\)\.\s*$").unwrap();
    static ref ARG_LINE_ARG_NAME_PATTERN: Regex =
        Regex::new(&format!(r"^\s*arg\(({})\)\.\s*$", ARG_AND_SPACE_PATTERN)).unwrap();
    static ref ATT_LINE_PATTERN: Regex = Regex::new(r"^\s*att\([^,]+,[^)]+\)\.\s*$").unwrap();
    static ref ATT_LINE_ARG_NAMES_PATTERN: Regex = Regex::new(&format!(
        r"^\s*att\(({}),({})\)\.\s*$",
        ARG_AND_SPACE_PATTERN, ARG_AND_SPACE_PATTERN,
    ))
    .unwrap();
}

fn captured_arg(c: &Captures, i: usize) -> WarningResult<String> {
    let str_arg = c.get(i).map_or("", |m| m.as_str());
    let trimmed_str_arg = str_arg.trim().to_string();
    if trimmed_str_arg.len() == str_arg.len() {
        WarningResult::Clean(trimmed_str_arg)
    } else {
        WarningResult::with_warning(
            trimmed_str_arg,
            "argument names beginning or ending by spaces may be ambiguous",
        )
    }
}

fn try_read_arg_line(l: &str) -> Result<Option<WarningResult<String>>> {
    if !ARG_LINE_PATTERN.is_match(l) {
        return Ok(None);
    }
    match ARG_LINE_ARG_NAME_PATTERN.captures(l) {
        Some(c) => Ok(Some(captured_arg(&c, 1))),
        None => Err(anyhow!("invalid argument name in {}", l.trim())),
    }
}

fn try_read_att_line(l: &str) -> Result<Option<WarningResult<(String, String)>>> {
    if !ATT_LINE_PATTERN.is_match(l) {
        return Ok(None);
    }
    match ATT_LINE_ARG_NAMES_PATTERN.captures(l) {
        Some(c) => Ok(Some(captured_arg(&c, 1).zip(captured_arg(&c, 2)))),
        None => Err(anyhow!("invalid argument names in {}", l.trim())),
    }
}

/// A reader for the Aspartix format.
///
/// This object is used to read an [`AAFramework`] encoded using the Aspartix input format, as defined on [the Aspartix website](https://www.dbai.tuwien.ac.at/research/argumentation/aspartix/dung.html).
/// The [LabelType](crate::aa::LabelType) of the returned argument frameworks is [String].
///
/// Argument names are made of letters, digits and underscores.
/// An argument may be declared after an attack, as long as it is declared before the attacks it is involved in.
/// Attacks involving undeclared arguments are rejected.
///
/// # Aspartix format
///
/// The following content defines an Argumentation Framework with three arguments labelled `a`, `b` and `c` and three attacks (`a` and `b` attack each other and `c` attacks `b`).
///
/// ```text
/// arg(a).
/// arg(b).
/// arg(c).
/// att(a,b).
/// att(b,a).
/// att(c,b).
/// ```
///
/// # Example
///
/// ```
/// # use circabri::aa::AAFramework;
/// # use circabri::io::{AspartixReader, InstanceReader};
/// fn read_af_from_str(s: &str) -> AAFramework<String> {
///     let reader = AspartixReader::default();
///     reader.read(&mut s.as_bytes()).expect("invalid Aspartix AF")
/// }
/// # read_af_from_str("arg(a).");
/// ```
#[derive(Default)]
pub struct AspartixReader {
    warning_handlers: Vec<WarningHandler>,
}

impl AspartixReader {
    fn warn(&self, line: usize, warning: &str) {
        self.warning_handlers
            .iter()
            .for_each(|h| (h)(line, warning.to_string()));
    }
}

impl InstanceReader<String> for AspartixReader {
    fn read(&self, reader: &mut dyn Read) -> Result<AAFramework<String>> {
        let mut af = AAFramework::default();
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line {}", i + 1);
            let l = &line.with_context(context)?;
            if l.trim().is_empty() {
                continue;
            }
            if let Some(a) = try_read_arg_line(l).with_context(context)? {
                let label = a.consume_warnings(|w| self.warn(i + 1, w));
                let n_before = af.n_arguments();
                af.new_argument(label);
                if af.n_arguments() == n_before {
                    self.warn(i + 1, "argument declared more than once");
                }
                continue;
            }
            if let Some(result) = try_read_att_line(l).with_context(context)? {
                let (a, b) = result.consume_warnings(|w| self.warn(i + 1, w));
                af.new_attack(&a, &b).with_context(context)?;
                continue;
            }
            return Err(anyhow!("syntax error in line \"{}\"", l)).with_context(context);
        }
        Ok(af)
    }

    fn read_arg_from_str<'a>(
        &self,
        af: &'a AAFramework<String>,
        arg: &str,
    ) -> Result<&'a Argument<String>> {
        af.argument_set().get_argument(&arg.to_string())
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_arg_line_pattern_ok() {
        assert!(ARG_LINE_PATTERN.is_match("arg(a)."));
        assert!(ARG_LINE_PATTERN.is_match("    arg(a).   "));
        assert!(ARG_LINE_PATTERN.is_match("arg(a. )."));
    }

    const WRONG_ARG_LINES: [&str; 6] = [
        "rg(a).",
        "arg(a)",
        "arg().",
        "arga).",
        "arg(a.",
        "arg(a).arg(b).",
    ];

    #[test]
    fn test_arg_line_pattern_not_ok() {
        WRONG_ARG_LINES
            .iter()
            .for_each(|p| assert!(!ARG_LINE_PATTERN.is_match(p)))
    }

    fn read_arg_name(l: &str) -> String {
        try_read_arg_line(l)
            .unwrap()
            .unwrap()
            .consume_warnings(|_| {})
    }

    #[test]
    fn test_try_read_arg_line_ok() {
        assert_eq!("a", read_arg_name("arg(a)."));
        assert_eq!("a", read_arg_name("arg( a )."));
        assert_eq!("a", read_arg_name("    arg(a).   "));
        assert_eq!("_a", read_arg_name("arg(_a)."));
        assert_eq!("a1_", read_arg_name("arg(a1_)."));
        assert_eq!("12", read_arg_name("arg(12)."));
    }

    #[test]
    fn test_try_read_arg_line_wrong_name() {
        ["arg(a.).", "arg(a-b).", "arg(a b)."].iter().for_each(|l| {
            assert!(try_read_arg_line(l).is_err());
        });
    }

    #[test]
    fn test_try_read_arg_line_wrong_line_pattern() {
        WRONG_ARG_LINES.iter().for_each(|p| {
            assert!(try_read_arg_line(p).unwrap().is_none());
        });
    }

    const WRONG_ATT_LINES: [&str; 8] = [
        "tt(a,b).",
        "att(a,b)",
        "att().",
        "att(a,).",
        "att(,b).",
        "atta,b).",
        "att(a,b.",
        "att(a,b).att(c,d).",
    ];

    #[test]
    fn test_att_line_pattern_not_ok() {
        WRONG_ATT_LINES
            .iter()
            .for_each(|p| assert!(!ATT_LINE_PATTERN.is_match(p)))
    }

    #[test]
    fn test_try_read_att_line_ok() {
        let read_att_names = |l: &str| {
            try_read_att_line(l)
                .unwrap()
                .unwrap()
                .consume_warnings(|_| {})
        };
        let expected = ("a".to_string(), "b".to_string());
        assert_eq!(expected, read_att_names("att(a,b)."));
        assert_eq!(expected, read_att_names("att( a , b )."));
        assert_eq!(expected, read_att_names("    att(a,b).   "));
    }

    #[test]
    fn test_try_read_att_line_wrong_name() {
        ["att(a.,b).", "att(a,b.).", "att(a,b,c)."]
            .iter()
            .for_each(|l| {
                assert!(try_read_att_line(l).is_err());
            });
    }

    fn str_args(af: &AAFramework<String>) -> Vec<String> {
        af.argument_set().iter().map(|s| format!("{}", s)).collect()
    }

    fn str_attacks(af: &AAFramework<String>) -> Vec<String> {
        af.iter_attacks()
            .map(|a| format!("({},{})", a.attacker(), a.attacked()))
            .collect()
    }

    #[test]
    fn test_read_ok() {
        let instance = "arg(a).\n\narg(b).\natt(a,b).\n";
        let af = AspartixReader::default()
            .read(&mut instance.as_bytes())
            .unwrap();
        assert_eq!(vec!["a", "b"], str_args(&af));
        assert_eq!(vec!["(a,b)"], str_attacks(&af));
    }

    #[test]
    fn test_read_empty() {
        let af = AspartixReader::default()
            .read(&mut "\n".as_bytes())
            .unwrap();
        assert_eq!(0, af.n_arguments());
        assert_eq!(0, af.n_attacks());
    }

    #[test]
    fn test_read_arg_after_att() {
        let instance = "arg(a).\narg(b).\natt(a,b).\narg(c).\natt(c,a).\n";
        let af = AspartixReader::default()
            .read(&mut instance.as_bytes())
            .unwrap();
        assert_eq!(vec!["a", "b", "c"], str_args(&af));
        assert_eq!(vec!["(a,b)", "(c,a)"], str_attacks(&af));
    }

    #[test]
    fn test_read_repeated_attack() {
        let instance = "arg(a).\narg(b).\natt(a,b).\natt(a,b).\n";
        let af = AspartixReader::default()
            .read(&mut instance.as_bytes())
            .unwrap();
        assert_eq!(1, af.n_attacks());
    }

    #[test]
    fn test_read_syntax_error() {
        let instance = "argument(a).\narg(b).\natt(a,b).\n";
        assert!(AspartixReader::default()
            .read(&mut instance.as_bytes())
            .is_err());
    }

    #[test]
    fn test_read_unknown_arg_in_att() {
        let instance = "arg(a).\narg(b).\natt(a,c).\n";
        assert!(AspartixReader::default()
            .read(&mut instance.as_bytes())
            .is_err());
    }

    #[test]
    fn test_read_arg_declared_after_its_use() {
        let instance = "arg(a).\natt(a,b).\narg(b).\n";
        assert!(AspartixReader::default()
            .read(&mut instance.as_bytes())
            .is_err());
    }

    fn read_with_warnings(instance: &str) -> Vec<(usize, String)> {
        let warnings = Rc::new(RefCell::new(vec![]));
        let warnings_clone = Rc::clone(&warnings);
        let mut reader = AspartixReader::default();
        reader.add_warning_handler(Box::new(move |i, w| {
            warnings_clone.borrow_mut().push((i, w))
        }));
        reader.read(&mut instance.as_bytes()).unwrap();
        let result = warnings.borrow().clone();
        result
    }

    #[test]
    fn test_read_warn_arg_left_space() {
        assert_eq!(
            vec![(
                1,
                "argument names beginning or ending by spaces may be ambiguous".to_string()
            )],
            read_with_warnings("arg( a).\narg(b).\natt(a,b).\n")
        );
    }

    #[test]
    fn test_read_warn_duplicate_arg() {
        assert_eq!(
            vec![(2, "argument declared more than once".to_string())],
            read_with_warnings("arg(a).\narg(a).\n")
        );
    }

    #[test]
    fn test_read_arg_from_str() {
        let instance = "arg(a).\natt(a,a).\n";
        let reader = AspartixReader::default();
        let af = reader.read(&mut instance.as_bytes()).unwrap();
        assert_eq!(1, af.n_arguments());
        assert!(reader.read_arg_from_str(&af, "a").is_ok());
        assert!(reader.read_arg_from_str(&af, "b").is_err());
    }
}
