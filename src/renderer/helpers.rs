//! String, inflection and arithmetic helpers for template expressions.
//!
//! [`HelperFunctions::new`] builds the table once; callers install it into
//! their own [`Environment`] either as global functions
//! (`{{ pluralize("cat") }}`) or as filters (`{{ "cat" | pluralize }}`).

use deunicode::deunicode;
use log::warn;
use minijinja::value::{Rest, Value, ValueKind};
use minijinja::{Environment, Error, ErrorKind, State};
use regex::Regex;
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::Chars;

pub use cruet::{
    case::{
        camel::to_camel_case, class::to_class_case, kebab::to_kebab_case,
        pascal::to_pascal_case, sentence::to_sentence_case, snake::to_snake_case,
        table::to_table_case, title::to_title_case,
    },
    number::ordinalize::ordinalize as to_ordinal,
    string::{pluralize::to_plural, singularize::to_singular},
    suffix::foreign_key::to_foreign_key,
};

/// Immutable name to callable table of template helpers.
#[derive(Debug, Clone)]
pub struct HelperFunctions {
    functions: BTreeMap<&'static str, Value>,
}

impl HelperFunctions {
    /// Builds the full helper table.
    pub fn new() -> Self {
        let mut functions = BTreeMap::new();
        let mut add = |name: &'static str, func: Value| {
            functions.insert(name, func);
        };

        // strings
        add("contains", Value::from_function(contains));
        add("contains_any", Value::from_function(contains_any));
        add("contains_rune", Value::from_function(contains_rune));
        add("count", Value::from_function(count));
        add("equal_fold", Value::from_function(equal_fold));
        add("fields", Value::from_function(fields));
        add("has_prefix", Value::from_function(has_prefix));
        add("has_suffix", Value::from_function(has_suffix));
        add("index", Value::from_function(index));
        add("index_any", Value::from_function(index_any));
        add("index_byte", Value::from_function(index_byte));
        add("index_rune", Value::from_function(index_rune));
        add("join", Value::from_function(join));
        add("last_index", Value::from_function(last_index));
        add("last_index_any", Value::from_function(last_index_any));
        add("regex", Value::from_function(regex_filter));
        add("repeat", Value::from_function(repeat));
        add("replace", Value::from_function(replace));
        add("split", Value::from_function(split));
        add("split_after", Value::from_function(split_after));
        add("split_after_n", Value::from_function(split_after_n));
        add("split_n", Value::from_function(split_n));
        add("title", Value::from_function(title));
        add("to_lower", Value::from_function(to_lower));
        add("to_title", Value::from_function(to_upper));
        add("to_upper", Value::from_function(to_upper));
        add("trim", Value::from_function(trim));
        add("trim_left", Value::from_function(trim_left));
        add("trim_prefix", Value::from_function(trim_prefix));
        add("trim_right", Value::from_function(trim_right));
        add("trim_space", Value::from_function(trim_space));
        add("trim_suffix", Value::from_function(trim_suffix));

        // inflections
        add("asciify", Value::from_function(asciify));
        add("camelize", Value::from_function(camelize));
        add("camelize_down_first", Value::from_function(camelize_down_first));
        add("capitalize", Value::from_function(capitalize));
        add("dasherize", Value::from_function(dasherize));
        add("foreign_key", Value::from_function(foreign_key));
        add("foreign_key_condensed", Value::from_function(foreign_key_condensed));
        add("humanize", Value::from_function(humanize));
        add("ordinalize", Value::from_function(ordinalize));
        add("parameterize", Value::from_function(parameterize));
        add("parameterize_join", Value::from_function(parameterize_join));
        add("pluralize", Value::from_function(pluralize));
        add("singularize", Value::from_function(singularize));
        add("tableize", Value::from_function(tableize));
        add("titleize", Value::from_function(titleize));
        add("typeify", Value::from_function(typeify));
        add("underscore", Value::from_function(underscore));

        // arithmetic and formatting
        add("incr", Value::from_function(incr));
        add("decr", Value::from_function(decr));
        add("sprintf", Value::from_function(sprintf));

        Self { functions }
    }

    /// Looks up a helper by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.functions.get(name)
    }

    /// Helper names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.functions.iter().map(|(name, func)| (*name, func))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registers every helper as a global function of `env`.
    pub fn install(&self, env: &mut Environment<'_>) {
        for (name, func) in self.iter() {
            env.add_global(name, func.clone());
        }
    }

    /// Registers every helper as a filter of `env`. The piped value becomes
    /// the first argument. Helpers named like a builtin filter (`title`,
    /// `replace`, `join`, `split`, `trim`) replace the builtin.
    pub fn install_filters(&self, env: &mut Environment<'_>) {
        for (name, func) in self.iter() {
            let func = func.clone();
            env.add_filter(name, move |state: &State, args: Rest<Value>| {
                func.call(state, &args.0)
            });
        }
    }
}

impl Default for HelperFunctions {
    fn default() -> Self {
        Self::new()
    }
}

fn contains(s: &str, substr: &str) -> bool {
    s.contains(substr)
}

fn contains_any(s: &str, chars: &str) -> bool {
    s.chars().any(|c: char| chars.contains(c))
}

/// Takes the single character a rune or byte helper expects.
fn single_char(s: &str, what: &str) -> Result<char, Error> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("expected a single {what}, got {s:?}"),
        )),
    }
}

fn contains_rune(s: &str, r: &str) -> Result<bool, Error> {
    Ok(s.contains(single_char(r, "character")?))
}

fn index_rune(s: &str, r: &str) -> Result<i64, Error> {
    Ok(byte_offset(s.find(single_char(r, "character")?)))
}

/// Byte offset of the first occurrence of an ASCII byte.
fn index_byte(s: &str, b: &str) -> Result<i64, Error> {
    let c = single_char(b, "byte")?;
    let byte = u8::try_from(c).ok().filter(u8::is_ascii).ok_or_else(|| {
        Error::new(ErrorKind::InvalidOperation, format!("{c:?} is not a single byte"))
    })?;
    Ok(byte_offset(s.bytes().position(|candidate| candidate == byte)))
}

/// Non-overlapping occurrences of `substr`; an empty `substr` counts the
/// gaps between characters.
fn count(s: &str, substr: &str) -> i64 {
    if substr.is_empty() {
        return s.chars().count() as i64 + 1;
    }
    s.matches(substr).count() as i64
}

fn equal_fold(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn fields(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

fn has_prefix(s: &str, prefix: &str) -> bool {
    s.starts_with(prefix)
}

fn has_suffix(s: &str, suffix: &str) -> bool {
    s.ends_with(suffix)
}

fn byte_offset(found: Option<usize>) -> i64 {
    found.map_or(-1, |idx| idx as i64)
}

fn index(s: &str, substr: &str) -> i64 {
    byte_offset(s.find(substr))
}

fn index_any(s: &str, chars: &str) -> i64 {
    byte_offset(s.find(|c: char| chars.contains(c)))
}

fn last_index(s: &str, substr: &str) -> i64 {
    byte_offset(s.rfind(substr))
}

fn last_index_any(s: &str, chars: &str) -> i64 {
    byte_offset(s.rfind(|c: char| chars.contains(c)))
}

fn join(elems: Vec<Value>, sep: &str) -> String {
    elems.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(sep)
}

/// Tests if a string matches a given regular expression pattern. An invalid
/// pattern is logged and never matches.
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

fn repeat(s: &str, n: i64) -> Result<String, Error> {
    let n = usize::try_from(n).map_err(|_| {
        Error::new(ErrorKind::InvalidOperation, format!("negative repeat count {n}"))
    })?;
    Ok(s.repeat(n))
}

/// Replaces the first `n` occurrences, or all of them when `n` is missing or
/// negative.
fn replace(s: &str, old: &str, new: &str, n: Option<i64>) -> String {
    match n.and_then(|n| usize::try_from(n).ok()) {
        Some(n) => s.replacen(old, new, n),
        None => s.replace(old, new),
    }
}

/// Splits `s` around `sep` into at most `n` parts (all parts when `n` is
/// negative, none when it is zero). With `keep_sep` the separator stays at
/// the end of each part. An empty `sep` splits between characters.
fn split_parts(s: &str, sep: &str, keep_sep: bool, n: i64) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    if sep.is_empty() {
        let chars: Vec<char> = s.chars().collect();
        let limit = if n < 0 { chars.len() } else { (n as usize).min(chars.len()) };
        let mut parts: Vec<String> =
            chars.iter().take(limit.saturating_sub(1)).map(char::to_string).collect();
        if limit > 0 {
            parts.push(chars[limit - 1..].iter().collect());
        }
        return parts;
    }

    let mut parts = Vec::new();
    let mut rest = s;
    while n < 0 || (parts.len() as i64) < n - 1 {
        let Some(idx) = rest.find(sep) else { break };
        let end = if keep_sep { idx + sep.len() } else { idx };
        parts.push(rest[..end].to_string());
        rest = &rest[idx + sep.len()..];
    }
    parts.push(rest.to_string());
    parts
}

fn split(s: &str, sep: &str) -> Vec<String> {
    split_parts(s, sep, false, -1)
}

fn split_n(s: &str, sep: &str, n: i64) -> Vec<String> {
    split_parts(s, sep, false, n)
}

fn split_after(s: &str, sep: &str) -> Vec<String> {
    split_parts(s, sep, true, -1)
}

fn split_after_n(s: &str, sep: &str, n: i64) -> Vec<String> {
    split_parts(s, sep, true, n)
}

/// Upper-cases the first letter of every word. Whitespace and every ASCII
/// character other than a letter, digit or `_` separate words, so `don't`
/// becomes `Don'T`.
fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = is_word_separator(c);
    }
    out
}

fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else {
        c.is_whitespace()
    }
}

fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

fn to_upper(s: &str) -> String {
    s.to_uppercase()
}

fn trim(s: &str, cutset: &str) -> String {
    s.trim_matches(|c: char| cutset.contains(c)).to_string()
}

fn trim_left(s: &str, cutset: &str) -> String {
    s.trim_start_matches(|c: char| cutset.contains(c)).to_string()
}

fn trim_right(s: &str, cutset: &str) -> String {
    s.trim_end_matches(|c: char| cutset.contains(c)).to_string()
}

fn trim_prefix(s: &str, prefix: &str) -> String {
    s.strip_prefix(prefix).unwrap_or(s).to_string()
}

fn trim_suffix(s: &str, suffix: &str) -> String {
    s.strip_suffix(suffix).unwrap_or(s).to_string()
}

fn trim_space(s: &str) -> String {
    s.trim().to_string()
}

/// Replaces non-ASCII characters with their closest ASCII spelling.
fn asciify(s: &str) -> String {
    deunicode(s)
}

fn camelize(s: &str) -> String {
    to_pascal_case(s)
}

fn camelize_down_first(s: &str) -> String {
    to_camel_case(s)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn dasherize(s: &str) -> String {
    to_kebab_case(s)
}

fn foreign_key(s: &str) -> String {
    to_foreign_key(s)
}

fn foreign_key_condensed(s: &str) -> String {
    format!("{}id", to_snake_case(s))
}

fn humanize(s: &str) -> String {
    to_sentence_case(s)
}

fn ordinalize(n: Value) -> String {
    to_ordinal(&n.to_string())
}

fn parameterize(s: &str) -> String {
    parameterize_join(s, "-")
}

/// Lower-cases `s` and joins its alphanumeric runs with `sep`.
fn parameterize_join(s: &str, sep: &str) -> String {
    s.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn pluralize(s: &str) -> String {
    to_plural(s)
}

fn singularize(s: &str) -> String {
    to_singular(s)
}

fn tableize(s: &str) -> String {
    to_table_case(s)
}

fn titleize(s: &str) -> String {
    to_title_case(s)
}

fn typeify(s: &str) -> String {
    to_class_case(s)
}

fn underscore(s: &str) -> String {
    to_snake_case(s)
}

fn incr(a: i64) -> Result<i64, Error> {
    a.checked_add(1)
        .ok_or_else(|| Error::new(ErrorKind::InvalidOperation, "incr overflows i64"))
}

fn decr(a: i64) -> Result<i64, Error> {
    a.checked_sub(1)
        .ok_or_else(|| Error::new(ErrorKind::InvalidOperation, "decr overflows i64"))
}

/// Flags, width and precision of one `%` directive.
#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

impl Directive {
    fn parse(chars: &mut Peekable<Chars<'_>>) -> Self {
        let mut directive = Directive::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => directive.minus = true,
                '+' => directive.plus = true,
                ' ' => directive.space = true,
                '0' => directive.zero = true,
                '#' => {}
                _ => break,
            }
            chars.next();
        }
        directive.width = take_number(chars);
        if chars.peek() == Some(&'.') {
            chars.next();
            directive.precision = Some(take_number(chars).unwrap_or(0));
        }
        directive
    }

    /// Prefix for a non-negative number: `+` or a space when asked for.
    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            ""
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }

    /// Pads `body` to the width. Zero padding goes after the sign of a number.
    fn pad(&self, body: String, numeric: bool) -> String {
        let len = body.chars().count();
        let Some(fill) = self.width.filter(|width| *width > len).map(|width| width - len) else {
            return body;
        };
        if self.minus {
            format!("{body}{}", " ".repeat(fill))
        } else if self.zero {
            let sign_len = usize::from(numeric && body.starts_with(['+', '-', ' ']));
            let (sign, digits) = body.split_at(sign_len);
            format!("{sign}{}{digits}", "0".repeat(fill))
        } else {
            format!("{}{body}", " ".repeat(fill))
        }
    }
}

fn take_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut digits = String::new();
    while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
        digits.push(*d);
        chars.next();
    }
    digits.parse().ok()
}

/// printf-style formatting. Supports `%v %s %d %f %q %t %x %X %%` with the
/// `- + 0 space` flags, a width and a precision such as `%-8s` or `%06.2f`.
/// A verb without an argument renders as `%!d(MISSING)`, an argument of the
/// wrong kind as `%!d(value)`.
fn sprintf(format: &str, args: Rest<Value>) -> String {
    let mut out = String::with_capacity(format.len());
    let mut args = args.0.into_iter();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let directive = Directive::parse(&mut chars);
        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.next() {
            Some(arg) => match format_verb(verb, &directive, &arg) {
                Some(formatted) => out.push_str(&formatted),
                None => out.push_str(&format!("%!{verb}({})", plain(&arg))),
            },
            None => out.push_str(&format!("%!{verb}(MISSING)")),
        }
    }

    let extra: Vec<String> = args.map(|arg| plain(&arg)).collect();
    if !extra.is_empty() {
        out.push_str(&format!("%!(EXTRA {})", extra.join(", ")));
    }
    out
}

/// The `%v` rendering of a value; booleans print in lower case.
fn plain(arg: &Value) -> String {
    match arg.kind() {
        ValueKind::Bool if arg.is_true() => "true".to_string(),
        ValueKind::Bool => "false".to_string(),
        _ => arg.to_string(),
    }
}

fn format_verb(verb: char, directive: &Directive, arg: &Value) -> Option<String> {
    let formatted = match verb {
        'v' | 's' => {
            let text = plain(arg);
            let text = match directive.precision {
                Some(max) if arg.kind() == ValueKind::String => text.chars().take(max).collect(),
                _ => text,
            };
            directive.pad(text, false)
        }
        'd' => {
            let n = i64::try_from(arg.clone()).ok()?;
            directive.pad(format!("{}{n}", directive.sign(n < 0)), true)
        }
        'f' => {
            let f = f64::try_from(arg.clone()).ok()?;
            let precision = directive.precision.unwrap_or(6);
            directive.pad(format!("{}{f:.precision$}", directive.sign(f < 0.0)), true)
        }
        'q' => directive.pad(format!("{:?}", plain(arg)), false),
        't' if arg.kind() == ValueKind::Bool => directive.pad(plain(arg), false),
        'x' | 'X' => {
            let hex = match i64::try_from(arg.clone()) {
                Ok(n) if n < 0 => format!("-{:x}", n.unsigned_abs()),
                Ok(n) => format!("{n:x}"),
                Err(_) => plain(arg).bytes().map(|b| format!("{b:02x}")).collect(),
            };
            let hex = if verb == 'X' { hex.to_uppercase() } else { hex };
            directive.pad(hex, true)
        }
        _ => return None,
    };
    Some(formatted)
}
