// crates/sincer-core/src/namegen.rs - Default name synthesis
//
// Records created without a name get one from a template such as
// "timer-$0", where the unescaped `$0` is replaced by a counter value.
// A backslash in front (`\$0`) keeps the placeholder literal.

use thiserror::Error;

use crate::validate::is_name_template;

/// Errors that can occur while generating names
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NameGenError {
    #[error("template '{0}' should contain an unescaped $0 placeholder")]
    InvalidTemplate(String),

    #[error("name generator can not get the previous name: counter minimal limit")]
    CounterFloor,

    #[error("name generator can not get the next name: counter maximal limit")]
    CounterCeiling,
}

/// Result type for name generation
pub type NameGenResult<T> = Result<T, NameGenError>;

/// Produces names by substituting a counter into a template
#[derive(Debug, Clone, PartialEq)]
pub struct NameGenerator {
    template: String,
    counter: u64,
}

impl NameGenerator {
    /// Create a generator; the template must contain an unescaped `$0`
    pub fn new<S: Into<String>>(template: S, counter: u64) -> NameGenResult<Self> {
        let template = template.into();
        if !is_name_template(&template) {
            return Err(NameGenError::InvalidTemplate(template));
        }
        Ok(Self { template, counter })
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// The name for the current counter value
    pub fn current(&self) -> String {
        let value = self.counter.to_string();
        let mut out = String::with_capacity(self.template.len() + value.len());
        let mut chars = self.template.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '\\' if starts_placeholder(&chars) => {
                    // `\$0` → literal `$0`
                    out.push('$');
                    out.push('0');
                    chars.next();
                    chars.next();
                }
                '$' if chars.peek() == Some(&'0') => {
                    out.push_str(&value);
                    chars.next();
                }
                _ => out.push(ch),
            }
        }

        out
    }

    /// Advance the counter; it can not go past `u64::MAX`
    pub fn next(&mut self) -> NameGenResult<&mut Self> {
        self.counter = self
            .counter
            .checked_add(1)
            .ok_or(NameGenError::CounterCeiling)?;
        Ok(self)
    }

    /// Step the counter back; it can not go below 1
    pub fn prev(&mut self) -> NameGenResult<&mut Self> {
        if self.counter <= 1 {
            return Err(NameGenError::CounterFloor);
        }
        self.counter -= 1;
        Ok(self)
    }
}

fn starts_placeholder(chars: &std::iter::Peekable<std::str::Chars<'_>>) -> bool {
    let mut lookahead = chars.clone();
    lookahead.next() == Some('$') && lookahead.next() == Some('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_placeholder() {
        let mut generator = NameGenerator::new("\\$0-template$0", 1).unwrap();
        assert_eq!(generator.current(), "$0-template1");
        assert_eq!(generator.next().unwrap().current(), "$0-template2");
    }

    #[test]
    fn test_default_template() {
        let mut generator = NameGenerator::new("timer-$0", 0).unwrap();
        assert_eq!(generator.next().unwrap().current(), "timer-1");
        assert_eq!(generator.counter(), 1);
    }

    #[test]
    fn test_every_placeholder_is_replaced() {
        let generator = NameGenerator::new("$0/$0", 7).unwrap();
        assert_eq!(generator.current(), "7/7");
    }

    #[test]
    fn test_invalid_template() {
        assert_eq!(
            NameGenerator::new("plain", 0),
            Err(NameGenError::InvalidTemplate("plain".to_string()))
        );
        assert!(NameGenerator::new("only\\$0", 0).is_err());
    }

    #[test]
    fn test_prev_stops_at_one() {
        let mut generator = NameGenerator::new("n$0", 2).unwrap();
        assert_eq!(generator.prev().unwrap().current(), "n1");
        assert_eq!(generator.prev().unwrap_err(), NameGenError::CounterFloor);
        assert_eq!(generator.counter(), 1);
    }

    #[test]
    fn test_next_stops_at_ceiling() {
        let mut generator = NameGenerator::new("n$0", u64::MAX - 1).unwrap();
        assert_eq!(generator.next().unwrap().counter(), u64::MAX);
        assert_eq!(generator.next().unwrap_err(), NameGenError::CounterCeiling);
        assert_eq!(generator.counter(), u64::MAX);
    }
}
