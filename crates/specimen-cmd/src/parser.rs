//! Command parser using nom
//!
//! Parses shell input into structured [`ParsedCommand`] values.
//!
//! # Supported Syntax
//!
//! - Simple commands: `specimens`
//! - Positional arguments: `load ammonite`
//! - Comma or space separated: `toggle septa, off` / `toggle septa off`
//! - Named arguments: `toggle name=septa, visible=on`
//! - Quoted strings: `show "compound eyes"`
//! - Multiple commands: `load trilobite; hide eyes; describe`
//! - Comments: `# whole line` or `reset  # trailing`

use nom::{
    branch::alt,
    bytes::complete::{escaped, tag, take_while1},
    character::complete::{char, multispace0, none_of, one_of, space1},
    combinator::{map, opt},
    multi::many0,
    number::complete::recognize_float,
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::args::{ArgValue, ParsedCommand};
use crate::error::ParseError;

/// Parse a single command from a string
///
/// # Example
/// ```
/// use specimen_cmd::parse_command;
///
/// let cmd = parse_command("toggle septa, visible=off").unwrap();
/// assert_eq!(cmd.name, "toggle");
/// assert_eq!(cmd.get_str(0), Some("septa"));
/// assert_eq!(cmd.get_named_bool("visible"), Some(false));
/// ```
pub fn parse_command(input: &str) -> Result<ParsedCommand, ParseError> {
    let input = strip_comment(input).trim();
    if input.is_empty() {
        return Err(ParseError::EmptyCommand);
    }
    if let Some(pos) = unterminated_quote(input) {
        return Err(ParseError::UnterminatedString(pos));
    }

    match parse_single_command(input) {
        Ok(("", cmd)) => Ok(cmd),
        Ok((remaining, _)) => Err(ParseError::Generic(format!(
            "unexpected trailing input: '{}'",
            remaining
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Parse multiple commands separated by semicolons or newlines
///
/// Empty segments and comment lines are skipped.
///
/// # Example
/// ```
/// use specimen_cmd::parse_commands;
///
/// let cmds = parse_commands("load trilobite; hide eyes\n# done\ndescribe").unwrap();
/// let names: Vec<_> = cmds.iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(names, ["load", "hide", "describe"]);
/// ```
pub fn parse_commands(input: &str) -> Result<Vec<ParsedCommand>, ParseError> {
    let mut commands = Vec::new();
    for line in input.lines() {
        let line = strip_comment(line);
        for segment in split_outside_quotes(line, ';') {
            if segment.trim().is_empty() {
                continue;
            }
            commands.push(parse_command(segment)?);
        }
    }
    Ok(commands)
}

/// Cut a trailing `#` comment that is not inside quotes
fn strip_comment(input: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '#' => return &input[..i],
            None => {}
        }
    }
    input
}

/// Split on `sep` outside quoted strings
fn split_outside_quotes(input: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == sep => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            None => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

/// Byte offset of a quote that is never closed
fn unterminated_quote(input: &str) -> Option<usize> {
    let mut open: Option<(char, usize)> = None;
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        match open {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some((q, _)) if c == q => open = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => open = Some((c, i)),
            None => {}
        }
    }
    open.map(|(_, pos)| pos)
}

// ============================================================================
// nom combinators
// ============================================================================

/// Parse a single command (name and arguments)
fn parse_single_command(input: &str) -> IResult<&str, ParsedCommand> {
    let (input, name) = parse_command_name(input)?;
    let (input, args) = opt(preceded(space1, parse_arguments))(input)?;
    let (input, _) = multispace0(input)?;

    Ok((
        input,
        ParsedCommand {
            name: name.to_string(),
            args: args.unwrap_or_default(),
        },
    ))
}

fn parse_command_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// Parse a comma or space separated argument list
fn parse_arguments(input: &str) -> IResult<&str, Vec<(Option<String>, ArgValue)>> {
    let (input, first) = parse_argument(input)?;
    let (input, rest) = many0(preceded(
        alt((
            map(tuple((multispace0, char(','), multispace0)), |_| ()),
            map(space1, |_| ()),
        )),
        parse_argument,
    ))(input)?;

    let mut args = vec![first];
    args.extend(rest);
    Ok((input, args))
}

/// Parse a single argument (possibly named)
fn parse_argument(input: &str) -> IResult<&str, (Option<String>, ArgValue)> {
    if let Ok((remaining, (name, _, _, value))) = tuple((
        parse_arg_name,
        multispace0,
        char('='),
        preceded(multispace0, parse_arg_value),
    ))(input)
    {
        return Ok((remaining, (Some(name.to_string()), value)));
    }

    let (input, value) = parse_arg_value(input)?;
    Ok((input, (None, value)))
}

fn parse_arg_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn parse_arg_value(input: &str) -> IResult<&str, ArgValue> {
    alt((
        map(parse_quoted_string, ArgValue::String),
        parse_number,
        parse_bool,
        map(parse_unquoted_value, |s| ArgValue::String(s.to_string())),
    ))(input)
}

/// Parse a quoted string (single or double quotes)
fn parse_quoted_string(input: &str) -> IResult<&str, String> {
    alt((
        map(tag("\"\""), |_| String::new()),
        map(tag("''"), |_| String::new()),
        map(
            delimited(
                char('"'),
                escaped(none_of("\"\\"), '\\', one_of("\"\\nt")),
                char('"'),
            ),
            unescape_string,
        ),
        map(
            delimited(
                char('\''),
                escaped(none_of("'\\"), '\\', one_of("'\\nt")),
                char('\''),
            ),
            unescape_string,
        ),
    ))(input)
}

/// True when `rest` does not continue the current token
fn at_word_boundary(rest: &str) -> bool {
    rest.chars()
        .next()
        .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '.' || c == '-'))
}

/// Parse a number (int or float) that stands alone as a token
fn parse_number(input: &str) -> IResult<&str, ArgValue> {
    let fail = || nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Float));

    let (remaining, digits) = recognize_float(input)?;
    if !at_word_boundary(remaining) {
        return Err(fail());
    }

    if let Ok(i) = digits.parse::<i64>() {
        return Ok((remaining, ArgValue::Int(i)));
    }
    digits
        .parse::<f64>()
        .map(|f| (remaining, ArgValue::Float(f)))
        .map_err(|_| fail())
}

/// Parse boolean keywords
fn parse_bool(input: &str) -> IResult<&str, ArgValue> {
    let (remaining, keyword) = alt((
        tag("true"),
        tag("false"),
        tag("yes"),
        tag("no"),
        tag("on"),
        tag("off"),
    ))(input)?;

    if !at_word_boundary(remaining) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }

    Ok((remaining, ArgValue::Bool(matches!(keyword, "true" | "yes" | "on"))))
}

/// Parse a bare word: anything up to whitespace, a separator or a quote
fn parse_unquoted_value(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !matches!(c, ',' | ';' | '"' | '\''))(input)
}

fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}
