use super::{InstanceReader, WarningHandler};
use crate::aa::{AAFramework, Argument};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Read};

/// A reader for the Trivial Graph Format.
///
/// The file begins with the argument names, one per line, followed by a line containing a single `#` character.
/// Then come the attacks, one per line, given as the names of the attacker and the attacked arguments separated by spaces.
/// Blank lines are ignored.
///
/// # Example
///
/// ```
/// # use circabri::io::{InstanceReader, TgfReader};
/// let instance = "a\nb\n#\na b\n";
/// let af = TgfReader::default().read(&mut instance.as_bytes()).unwrap();
/// assert_eq!(2, af.n_arguments());
/// assert_eq!(1, af.n_attacks());
/// ```
#[derive(Default)]
pub struct TgfReader {
    warning_handlers: Vec<WarningHandler>,
}

impl TgfReader {
    fn warn(&self, line: usize, warning: &str) {
        self.warning_handlers
            .iter()
            .for_each(|h| (h)(line, warning.to_string()));
    }
}

impl InstanceReader<String> for TgfReader {
    fn read(&self, reader: &mut dyn Read) -> Result<AAFramework<String>> {
        let mut af = AAFramework::default();
        let mut in_attacks = false;
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line {}", i + 1);
            let line = line.with_context(context)?;
            let l = line.trim();
            if l.is_empty() {
                continue;
            }
            if l == "#" {
                if in_attacks {
                    return Err(anyhow!("found a second separator line")).with_context(context);
                }
                in_attacks = true;
                continue;
            }
            let words = l.split_whitespace().collect::<Vec<&str>>();
            if in_attacks {
                if words.len() != 2 {
                    return Err(anyhow!(
                        "expected two argument names in attack line \"{}\"",
                        l
                    ))
                    .with_context(context);
                }
                af.new_attack(&words[0].to_string(), &words[1].to_string())
                    .with_context(context)?;
            } else {
                if words.len() != 1 {
                    return Err(anyhow!("argument names cannot contain spaces (\"{}\")", l))
                        .with_context(context);
                }
                let n_before = af.n_arguments();
                af.new_argument(l.to_string());
                if af.n_arguments() == n_before {
                    self.warn(i + 1, "argument declared more than once");
                }
            }
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
