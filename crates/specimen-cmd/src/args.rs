//! Command argument types
//!
//! Arguments are positional or `name=value`; values keep the type the
//! parser recognized and convert on access.

use std::fmt;

/// A command argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Identifier, key or quoted text
    String(String),
    Int(i64),
    Float(f64),
    /// `on`/`off`, `true`/`false`, `yes`/`no`
    Bool(bool),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::String(s) if s.contains([' ', ',', ';', '#']) => write!(f, "\"{}\"", s),
            ArgValue::String(s) => write!(f, "{}", s),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Float(n) => write!(f, "{}", n),
            ArgValue::Bool(b) => write!(f, "{}", if *b { "on" } else { "off" }),
        }
    }
}

impl ArgValue {
    /// Borrow as text; numbers and bools are not strings
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(i) => Some(*i),
            ArgValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ArgValue::Float(f) => Some(*f),
            ArgValue::Int(i) => Some(*i as f64),
            ArgValue::String(s) => s.parse().ok(),
            ArgValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            ArgValue::Int(i) => Some(*i != 0),
            ArgValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "on" | "yes" | "show" => Some(true),
                "false" | "off" | "no" | "hide" => Some(false),
                _ => None,
            },
            ArgValue::Float(_) => None,
        }
    }

    /// Text form of any value, for arguments that accept keys like `1`
    pub fn to_text(&self) -> String {
        match self {
            ArgValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::String(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::String(s)
    }
}

impl From<i64> for ArgValue {
    fn from(i: i64) -> Self {
        ArgValue::Int(i)
    }
}

impl From<f64> for ArgValue {
    fn from(f: f64) -> Self {
        ArgValue::Float(f)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

/// A parsed command with its name and arguments
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    /// The command name (e.g., "load", "toggle", "tab")
    pub name: String,
    /// Arguments as (optional_name, value) pairs
    ///
    /// Positional arguments have `None` as the name.
    pub args: Vec<(Option<String>, ArgValue)>,
}

impl ParsedCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Add a positional argument
    pub fn with_arg(mut self, value: impl Into<ArgValue>) -> Self {
        self.args.push((None, value.into()));
        self
    }

    /// Add a named argument
    pub fn with_named_arg(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.args.push((Some(name.into()), value.into()));
        self
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Get the `index`th positional argument, skipping named ones
    pub fn get_arg(&self, index: usize) -> Option<&ArgValue> {
        self.args
            .iter()
            .filter(|(name, _)| name.is_none())
            .nth(index)
            .map(|(_, v)| v)
    }

    pub fn get_named(&self, name: &str) -> Option<&ArgValue> {
        self.args
            .iter()
            .find(|(n, _)| n.as_deref() == Some(name))
            .map(|(_, v)| v)
    }

    /// Positional argument at `index`, or the named argument `name`
    pub fn get(&self, index: usize, name: &str) -> Option<&ArgValue> {
        self.get_arg(index).or_else(|| self.get_named(name))
    }

    pub fn get_str(&self, index: usize) -> Option<&str> {
        self.get_arg(index).and_then(|v| v.as_str())
    }

    pub fn get_bool(&self, index: usize) -> Option<bool> {
        self.get_arg(index).and_then(|v| v.as_bool())
    }

    pub fn get_named_str(&self, name: &str) -> Option<&str> {
        self.get_named(name).and_then(|v| v.as_str())
    }

    pub fn get_named_bool(&self, name: &str) -> Option<bool> {
        self.get_named(name).and_then(|v| v.as_bool())
    }
}

impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, (name, value)) in self.args.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            match name {
                Some(name) => write!(f, "{}={}", name, value)?,
                None => write!(f, "{}", value)?,
            }
        }
        Ok(())
    }
}
