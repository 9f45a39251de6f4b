//! Typed builder for the grammar's expression language.
//!
//! Filter predicates, formulas, signal updates and production-rule tests are all
//! strings in the output document. Building them as an [`Expr`] tree and rendering
//! once keeps field names escaped and operator precedence correct.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Gt,
    Gte,
    Lt,
    Lte,
    StrictEq,
    StrictNe,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Gt => ">",
            BinaryOp::Gte => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Lte => "<=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNe => "!==",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::StrictEq | BinaryOp::StrictNe => 3,
            BinaryOp::Gt | BinaryOp::Gte | BinaryOp::Lt | BinaryOp::Lte => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 6,
        }
    }
}

const UNARY_PRECEDENCE: u8 = 7;
const ATOM_PRECEDENCE: u8 = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Bare identifier: `datum`, a signal name, or a builtin constant
    Ident(String),
    Member {
        object: Box<Expr>,
        property: String,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Number(f64),
    String(String),
    Bool(bool),
    Null,
    Not(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn ident<S: Into<String>>(name: S) -> Self {
        Expr::Ident(name.into())
    }

    /// Reference to a signal by name
    pub fn signal<S: Into<String>>(name: S) -> Self {
        Self::ident(name)
    }

    /// `datum.<field>`
    pub fn datum<S: Into<String>>(field: S) -> Self {
        Self::ident("datum").member(field)
    }

    /// `datum.datum.<field>`, used by marks built on top of other mark items
    pub fn nested_datum<S: Into<String>>(field: S) -> Self {
        Self::datum("datum").member(field)
    }

    pub fn num<N: Into<f64>>(value: N) -> Self {
        Expr::Number(value.into())
    }

    pub fn str<S: Into<String>>(value: S) -> Self {
        Expr::String(value.into())
    }

    pub fn null() -> Self {
        Expr::Null
    }

    pub fn call<S: Into<String>, I: IntoIterator<Item = Expr>>(name: S, args: I) -> Self {
        Expr::Call {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn binary<L: Into<Expr>, R: Into<Expr>>(op: BinaryOp, left: L, right: R) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn member<S: Into<String>>(self, property: S) -> Self {
        Expr::Member {
            object: Box::new(self),
            property: property.into(),
        }
    }

    pub fn index<E: Into<Expr>>(self, index: E) -> Self {
        Expr::Index {
            object: Box::new(self),
            index: Box::new(index.into()),
        }
    }

    pub fn and<E: Into<Expr>>(self, other: E) -> Self {
        Self::binary(BinaryOp::And, self, other)
    }

    pub fn or<E: Into<Expr>>(self, other: E) -> Self {
        Self::binary(BinaryOp::Or, self, other)
    }

    pub fn gte<E: Into<Expr>>(self, other: E) -> Self {
        Self::binary(BinaryOp::Gte, self, other)
    }

    pub fn lte<E: Into<Expr>>(self, other: E) -> Self {
        Self::binary(BinaryOp::Lte, self, other)
    }

    pub fn strict_eq<E: Into<Expr>>(self, other: E) -> Self {
        Self::binary(BinaryOp::StrictEq, self, other)
    }

    pub fn strict_ne<E: Into<Expr>>(self, other: E) -> Self {
        Self::binary(BinaryOp::StrictNe, self, other)
    }

    /// Left-folded conjunction, `None` when there is nothing to conjoin
    pub fn all<I: IntoIterator<Item = Expr>>(exprs: I) -> Option<Expr> {
        exprs.into_iter().reduce(|acc, e| acc.and(e))
    }

    /// Left-folded sum, `None` for an empty list
    pub fn sum<I: IntoIterator<Item = Expr>>(exprs: I) -> Option<Expr> {
        exprs.into_iter().reduce(|acc, e| acc + e)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Not(_) => UNARY_PRECEDENCE,
            Expr::Number(v) if v.is_sign_negative() && *v != 0.0 => UNARY_PRECEDENCE,
            _ => ATOM_PRECEDENCE,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parens: bool) -> fmt::Result {
        if parens {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => write!(f, "{name}"),
            Expr::Member { object, property } => {
                object.fmt_operand(f, object.precedence() < ATOM_PRECEDENCE)?;
                if is_identifier(property) {
                    write!(f, ".{property}")
                } else {
                    write!(f, "[{}]", quote(property))
                }
            }
            Expr::Index { object, index } => {
                object.fmt_operand(f, object.precedence() < ATOM_PRECEDENCE)?;
                write!(f, "[{index}]")
            }
            Expr::Number(v) => fmt_number(*v, f),
            Expr::String(s) => write!(f, "{}", quote(s)),
            Expr::Bool(b) => write!(f, "{b}"),
            Expr::Null => write!(f, "null"),
            Expr::Not(inner) => {
                write!(f, "!")?;
                inner.fmt_operand(f, inner.precedence() < UNARY_PRECEDENCE)
            }
            Expr::Binary { op, left, right } => {
                let prec = op.precedence();
                left.fmt_operand(f, left.precedence() < prec)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_operand(f, right.precedence() <= prec)
            }
            Expr::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

macro_rules! impl_binary_operator {
    ($trait_name:ident, $method:ident, $op:expr) => {
        impl<E: Into<Expr>> ops::$trait_name<E> for Expr {
            type Output = Expr;

            fn $method(self, rhs: E) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }
    };
}

impl_binary_operator!(Add, add, BinaryOp::Add);
impl_binary_operator!(Sub, sub, BinaryOp::Sub);
impl_binary_operator!(Mul, mul, BinaryOp::Mul);
impl_binary_operator!(Div, div, BinaryOp::Div);
impl_binary_operator!(Rem, rem, BinaryOp::Mod);

impl ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Number(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Number(value as f64)
    }
}

impl From<u32> for Expr {
    fn from(value: u32) -> Self {
        Expr::Number(value as f64)
    }
}

impl From<usize> for Expr {
    fn from(value: usize) -> Self {
        Expr::Number(value as f64)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Bool(value)
    }
}

fn fmt_number(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if v.is_nan() {
        write!(f, "NaN")
    } else if v.is_infinite() {
        write!(f, "{}Infinity", if v < 0.0 { "-" } else { "" })
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        write!(f, "{}", v as i64)
    } else {
        write!(f, "{v}")
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_conjunction() {
        let x = || Expr::datum("x");
        let expr = Expr::all([x().gte(5), x().lte(10)]).unwrap();
        assert_eq!(expr.render(), "datum.x >= 5 && datum.x <= 10");
        assert_eq!(Expr::all(Vec::new()), None);
    }

    #[test]
    fn test_parenthesizes_lower_precedence_operands() {
        let expr = (Expr::datum("date") - Expr::datum("dateMin") + 86400000.0) / 86400000.0;
        assert_eq!(
            expr.render(),
            "(datum.date - datum.dateMin + 86400000) / 86400000"
        );

        let right_nested = Expr::datum("a") - (Expr::datum("b") - Expr::datum("c"));
        assert_eq!(right_nested.render(), "datum.a - (datum.b - datum.c)");
    }

    #[test]
    fn test_index_and_calls() {
        let coef = || Expr::datum("coef");
        let expr = coef().index(0) + coef().index(1) * Expr::call("pow", [Expr::datum("x"), Expr::num(1.0)]);
        assert_eq!(
            expr.render(),
            "datum.coef[0] + datum.coef[1] * pow(datum.x, 1)"
        );
    }

    #[test]
    fn test_not_binds_tighter_than_and() {
        let selected = || Expr::signal("a_selectedId");
        let id = || Expr::datum("rscMarkId");
        let expr = selected()
            .strict_eq(id())
            .or((!selected()).and(Expr::signal("a_hoveredId").strict_eq(id())));
        assert_eq!(
            expr.render(),
            "a_selectedId === datum.rscMarkId || !a_selectedId && a_hoveredId === datum.rscMarkId"
        );

        let negated_group = !(Expr::signal("a").and(Expr::signal("b")));
        assert_eq!(negated_group.render(), "!(a && b)");
    }

    #[test]
    fn test_escapes_field_names_and_strings() {
        assert_eq!(Expr::datum("unit price").render(), "datum['unit price']");
        assert_eq!(Expr::datum("it's").render(), "datum['it\\'s']");
        assert_eq!(Expr::str("~%").render(), "'~%'");
        assert_eq!(Expr::nested_datum("rscMarkId").render(), "datum.datum.rscMarkId");
    }

    #[test]
    fn test_escapes_line_terminators() {
        assert_eq!(Expr::str("a\r\nb").render(), "'a\\r\\nb'");
        assert_eq!(Expr::str("a\u{2028}b\u{2029}").render(), "'a\\u2028b\\u2029'");
        assert_eq!(Expr::datum("line\rbreak").render(), "datum['line\\rbreak']");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(Expr::num(5.0).render(), "5");
        assert_eq!(Expr::num(1.5).render(), "1.5");
        assert_eq!(Expr::num(-2.0).render(), "-2");
        assert_eq!(
            (Expr::call("bandwidth", [Expr::str("xBand")]) / -2.0).render(),
            "bandwidth('xBand') / -2"
        );
    }

    #[test]
    fn test_serializes_as_rendered_string() {
        let value = serde_json::to_value(Expr::datum("x").gte(5)).unwrap();
        assert_eq!(value, serde_json::json!("datum.x >= 5"));
    }
}
