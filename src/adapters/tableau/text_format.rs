//! Line-oriented text format of performance tableaux.
//!
//! ```text
//! # bipolar performance tableau
//! name: <name>
//! [actions]
//! <id> | <name> | <comment>
//! [objectives]
//! <id> | <name> | <criterion id>, <criterion id>, ...
//! [criteria]
//! <id> | <name> | <comment> | scale=<min>,<max> | direction=<max|min> | weight=<w> | <kind>=<alpha>,<beta> ...
//! [evaluation]
//! <criterion id> | <action id>=<decimal|NA|-999> | ...
//! ```
//!
//! Separators, backslashes, newlines and edge whitespace inside text fields
//! are backslash-escaped. Values keep their decimal scale.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ActionId, CriterionId, ObjectiveId};
use crate::domain::performance::{
    Action, Criterion, Direction, Evaluation, Objective, PerformanceTableau, PerformanceTableauBuilder, Scale,
    Threshold, ThresholdKind,
};
use crate::ports::StoreError;

const HEADER: &str = "# bipolar performance tableau";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Actions,
    Objectives,
    Criteria,
    Evaluation,
}

impl Section {
    fn from_header(line: &str) -> Option<Self> {
        match line {
            "[actions]" => Some(Section::Actions),
            "[objectives]" => Some(Section::Objectives),
            "[criteria]" => Some(Section::Criteria),
            "[evaluation]" => Some(Section::Evaluation),
            _ => None,
        }
    }
}

/// Parses a tableau from its text form.
///
/// # Errors
///
/// `ParseFailed` with the offending line for malformed content, `Domain`
/// when the content describes an invalid tableau.
pub fn parse_tableau(text: &str) -> Result<PerformanceTableau, StoreError> {
    let mut builder = PerformanceTableauBuilder::new();
    let mut section = Section::Preamble;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            section = Section::from_header(line)
                .ok_or_else(|| StoreError::parse(line_no, format!("unknown section '{}'", line)))?;
            continue;
        }
        builder = match section {
            Section::Preamble => {
                let name = line
                    .strip_prefix("name:")
                    .ok_or_else(|| StoreError::parse(line_no, "expected 'name:' or a section header"))?;
                builder.name(unescape(name.trim()))
            }
            Section::Actions => builder.action(parse_action(line, line_no)?),
            Section::Objectives => builder.objective(parse_objective(line, line_no)?),
            Section::Criteria => builder.criterion(parse_criterion(line, line_no)?),
            Section::Evaluation => parse_evaluations(builder, line, line_no)?,
        };
    }
    Ok(builder.build()?)
}

/// Writes a tableau in its text form.
pub fn format_tableau(tableau: &PerformanceTableau) -> String {
    TextTableau(tableau).to_string()
}

/// Text rendering of a tableau.
struct TextTableau<'a>(&'a PerformanceTableau);

impl fmt::Display for TextTableau<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tableau = self.0;
        writeln!(f, "{}", HEADER)?;
        writeln!(f, "name: {}", escape(tableau.name()))?;

        writeln!(f, "[actions]")?;
        for action in tableau.actions() {
            writeln!(
                f,
                "{} | {} | {}",
                escape(action.id.as_str()),
                escape(&action.name),
                escape(&action.comment)
            )?;
        }

        if !tableau.objectives().is_empty() {
            writeln!(f, "[objectives]")?;
            for objective in tableau.objectives() {
                let criteria: Vec<String> = objective.criteria.iter().map(|c| escape(c.as_str())).collect();
                writeln!(
                    f,
                    "{} | {} | {}",
                    escape(objective.id.as_str()),
                    escape(&objective.name),
                    criteria.join(", ")
                )?;
            }
        }

        writeln!(f, "[criteria]")?;
        for criterion in tableau.criteria() {
            write!(
                f,
                "{} | {} | {} | scale={},{} | direction={} | weight={}",
                escape(criterion.id.as_str()),
                escape(&criterion.name),
                escape(&criterion.comment),
                criterion.scale.min,
                criterion.scale.max,
                criterion.direction.code(),
                criterion.weight
            )?;
            for (kind, threshold) in &criterion.thresholds {
                write!(f, " | {}={},{}", kind.code(), threshold.alpha, threshold.beta)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "[evaluation]")?;
        for (g, criterion) in tableau.criteria().iter().enumerate() {
            write!(f, "{}", escape(criterion.id.as_str()))?;
            for (x, action) in tableau.actions().iter().enumerate() {
                write!(
                    f,
                    " | {}={}",
                    escape(action.id.as_str()),
                    tableau.original_evaluation(g, x)
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn parse_action(line: &str, line_no: usize) -> Result<Action, StoreError> {
    let fields = fields(line, '|');
    if fields.is_empty() || fields.len() > 3 {
        return Err(StoreError::parse(line_no, "expected '<id> | <name> | <comment>'"));
    }
    let id = ActionId::new(fields[0].clone()).map_err(|e| StoreError::parse(line_no, e.to_string()))?;
    let mut action = Action::new(id);
    if let Some(name) = fields.get(1) {
        action = action.with_name(name.clone());
    }
    if let Some(comment) = fields.get(2) {
        action = action.with_comment(comment.clone());
    }
    Ok(action)
}

fn parse_objective(line: &str, line_no: usize) -> Result<Objective, StoreError> {
    let raw = split_unescaped(line, '|');
    if raw.len() != 3 {
        return Err(StoreError::parse(line_no, "expected '<id> | <name> | <criteria>'"));
    }
    let id = ObjectiveId::new(unescape(raw[0].trim())).map_err(|e| StoreError::parse(line_no, e.to_string()))?;
    let criteria = split_unescaped(raw[2], ',')
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| CriterionId::new(unescape(c)).map_err(|e| StoreError::parse(line_no, e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Objective::new(id, criteria).with_name(unescape(raw[1].trim())))
}

fn parse_criterion(line: &str, line_no: usize) -> Result<Criterion, StoreError> {
    let raw = split_unescaped(line, '|');
    if raw.len() < 3 {
        return Err(StoreError::parse(line_no, "expected '<id> | <name> | <comment> | key=value ...'"));
    }
    let id = CriterionId::new(unescape(raw[0].trim())).map_err(|e| StoreError::parse(line_no, e.to_string()))?;
    let mut criterion = Criterion::new(id)
        .with_name(unescape(raw[1].trim()))
        .with_comment(unescape(raw[2].trim()));

    for field in &raw[3..] {
        let (key, value) = key_value(field, line_no)?;
        criterion = match key.as_str() {
            "scale" => {
                let (min, max) = decimal_pair(&value, line_no)?;
                criterion.with_scale(Scale::new(min, max).map_err(|e| StoreError::parse(line_no, e.to_string()))?)
            }
            "direction" => criterion.with_direction(
                Direction::from_str(&value).map_err(|e| StoreError::parse(line_no, e.to_string()))?,
            ),
            "weight" => criterion.with_weight(decimal(&value, line_no)?),
            other => {
                let kind = ThresholdKind::from_str(other).map_err(|e| StoreError::parse(line_no, e.to_string()))?;
                let (alpha, beta) = decimal_pair(&value, line_no)?;
                criterion.with_threshold(kind, Threshold::new(alpha, beta))
            }
        };
    }
    Ok(criterion)
}

fn parse_evaluations(
    mut builder: PerformanceTableauBuilder,
    line: &str,
    line_no: usize,
) -> Result<PerformanceTableauBuilder, StoreError> {
    let raw = split_unescaped(line, '|');
    let criterion = unescape(raw[0].trim());
    for field in &raw[1..] {
        let (action, value) = key_value(field, line_no)?;
        let evaluation = Evaluation::from_str(&value).map_err(|e| StoreError::parse(line_no, e.to_string()))?;
        builder = builder.evaluation(&criterion, action, evaluation);
    }
    Ok(builder)
}

fn key_value(field: &str, line_no: usize) -> Result<(String, String), StoreError> {
    match split_unescaped(field, '=').as_slice() {
        [key, value] => Ok((unescape(key.trim()), value.trim().to_string())),
        _ => Err(StoreError::parse(line_no, format!("expected 'key=value', got '{}'", field.trim()))),
    }
}

fn decimal(value: &str, line_no: usize) -> Result<Decimal, StoreError> {
    Decimal::from_str(value.trim()).map_err(|e| StoreError::parse(line_no, format!("'{}': {}", value.trim(), e)))
}

fn decimal_pair(value: &str, line_no: usize) -> Result<(Decimal, Decimal), StoreError> {
    let (a, b) = value
        .split_once(',')
        .ok_or_else(|| StoreError::parse(line_no, format!("expected '<a>,<b>', got '{}'", value)))?;
    Ok((decimal(a, line_no)?, decimal(b, line_no)?))
}

/// Trimmed and unescaped fields of a line.
fn fields(line: &str, separator: char) -> Vec<String> {
    split_unescaped(line, separator)
        .into_iter()
        .map(|f| unescape(f.trim()))
        .collect()
}

/// Splits on `separator` occurrences not preceded by a backslash escape.
fn split_unescaped(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == separator {
            parts.push(&text[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Escapes a text field so it survives splitting and trimming.
fn escape(text: &str) -> String {
    let first = text.find(|c: char| !c.is_whitespace()).unwrap_or(text.len());
    let last = text
        .rfind(|c: char| !c.is_whitespace())
        .map(|i| i + text[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(first);
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        let edge = i < first || i >= last;
        match c {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\|"),
            ',' => out.push_str("\\,"),
            '=' => out.push_str("\\="),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' if edge => out.push_str("\\t"),
            ' ' if edge => out.push_str("\\s"),
            '#' | '[' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Reverses [`escape`].
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('s') => out.push(' '),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "\
# bipolar performance tableau
name: cars
[actions]
a | Alpha | fast
b | Beta, the second | has a \\| pipe
[objectives]
o | Economy | price
[criteria]
price | Price |  | scale=0,50000 | direction=min | weight=2 | ind=500,0 | p=1000,0.01
speed | Speed | km/h | scale=0,300 | direction=max | weight=1.5 | v=100,0
[evaluation]
price | a=24000.00 | b=NA
speed | a=210 | b=-999
";

    #[test]
    fn sample_parses() {
        let t = parse_tableau(SAMPLE).unwrap();
        assert_eq!(t.name(), "cars");
        assert_eq!(t.action_count(), 2);
        assert_eq!(t.actions()[1].name, "Beta, the second");
        assert_eq!(t.actions()[1].comment, "has a | pipe");
        assert_eq!(t.criteria()[0].direction, Direction::Min);
        assert_eq!(t.criteria()[0].weight, dec!(2));
        assert_eq!(
            t.criteria()[0].threshold(ThresholdKind::Preference),
            Some(&Threshold::new(dec!(1000), dec!(0.01)))
        );
        assert_eq!(t.original_evaluation(0, 0).to_string(), "24000.00");
        assert!(t.evaluation(0, 1).is_missing());
        assert!(t.evaluation(1, 1).is_missing());
        assert_eq!(t.objectives()[0].criteria[0].as_str(), "price");
    }

    #[test]
    fn format_then_parse_is_lossless() {
        let t = parse_tableau(SAMPLE).unwrap();
        let text = format_tableau(&t);
        let back = parse_tableau(&text).unwrap();
        assert_eq!(back, t);
        assert_eq!(format_tableau(&back), text);
    }

    #[test]
    fn evaluation_at_the_legacy_token_is_not_lost() {
        let text = "[actions]\na\nb\n[criteria]\ng | G | | scale=-1000,0\n[evaluation]\ng | a=-999.0 | b=-999\n";
        let t = parse_tableau(text).unwrap();
        assert_eq!(t.original_evaluation(0, 0), Evaluation::Value(dec!(-999)));
        assert!(t.original_evaluation(0, 1).is_missing());
        let back = parse_tableau(&format_tableau(&t)).unwrap();
        assert_eq!(back.original_evaluation(0, 0), Evaluation::Value(dec!(-999)));
        assert!(back.original_evaluation(0, 1).is_missing());
    }

    #[test]
    fn awkward_text_survives_escaping() {
        for text in ["a|b", " lead", "trail\t", "x=y, z", "back\\slash", "two\nlines", "#hash", "[x]"] {
            let escaped = escape(text);
            assert!(!escaped.contains('\n'));
            assert_eq!(split_unescaped(&escaped, '|').len(), 1);
            assert_eq!(unescape(escaped.trim()), text);
        }
    }

    #[test]
    fn errors_carry_line_numbers() {
        let text = "name: x\n[actions]\na\n[criteria]\ng | G | | weight=abc\n";
        match parse_tableau(text) {
            Err(StoreError::ParseFailed { line, .. }) => assert_eq!(line, 5),
            other => panic!("expected a parse error, got {:?}", other),
        }
        assert!(matches!(parse_tableau("[nonsense]\n"), Err(StoreError::ParseFailed { line: 1, .. })));
    }

    #[test]
    fn invalid_content_is_a_domain_error() {
        let text = "[actions]\na\n[criteria]\ng | G | | weight=0\n";
        assert!(matches!(parse_tableau(text), Err(StoreError::Domain(_))));
    }
}
