//! Syntax tree node variants (spec §3.2).
//!
//! Trees are owned top-down: a node's children are `Box`-owned, never
//! shared or back-referenced. This maps spec §3.3's ownership rules
//! directly onto Rust ownership — candidate trees are simply dropped when
//! the resolver discards them, and the chosen tree moves into the
//! line-result without any lifetime to thread through the orchestrator.

use calc_base::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericBase {
    Decimal,
    Hex,
    Octal,
    Binary,
}

/// A unit expression as written: separate numerator/denominator lists for
/// display, each unit name paired with an exponent. Normalized into a
/// signed-exponent term list only at evaluation time (spec §4.4).
#[derive(Debug, Clone, PartialEq)]
pub struct UnitExpr {
    pub numerator: Vec<(String, i32)>,
    pub denominator: Vec<(String, i32)>,
}

impl UnitExpr {
    pub fn single(name: impl Into<String>) -> Self {
        UnitExpr { numerator: vec![(name.into(), 1)], denominator: Vec::new() }
    }

    pub fn dimensionless() -> Self {
        UnitExpr { numerator: Vec::new(), denominator: Vec::new() }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.numerator.is_empty() && self.denominator.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    Xor,
    BitAnd,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Per,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    Factorial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOp {
    To,
    In,
    As,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordInstant {
    Now,
    Today,
    Yesterday,
    Tomorrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDirection {
    Ago,
    FromNow,
}

/// Presentation-format targets a `Conversion` node may name (spec §4.10).
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationFormat {
    Base(u32),
    Fraction,
    Scientific(Option<u32>),
    Percentage,
    Ordinal,
    Iso8601,
    Rfc9557,
    Rfc2822,
    Unix,
    UnixMillis,
    SigFigs(u32),
    Decimals(u32),
}

/// A conversion's target (spec §4.2 recurrent ambiguity #5: a single
/// composite target vs. nested conversions).
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionTarget {
    Unit(UnitExpr),
    Composite(Vec<UnitExpr>),
    Format(PresentationFormat),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredLiteralValue {
    pub magnitude: f64,
    pub unit: UnitExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    NumericLiteral { value: f64, base: NumericBase, raw: String },
    MeasuredLiteral { magnitude: Box<Expr>, unit: UnitExpr },
    CompositeLiteral(Vec<MeasuredLiteralValue>),
    BooleanLiteral(bool),
    ConstantRef(String),
    VariableRef(String),
    PlainDateLiteral { year: i32, month: u32, day: u32 },
    PlainTimeLiteral { hour: u32, minute: u32, second: u32, millisecond: u32 },
    PlainDateTimeLiteral { date: Box<Expr>, time: Box<Expr> },
    ZonedDateTimeLiteral { datetime: Box<Expr>, zone: String },
    InstantLiteral(i64),
    KeywordInstant(KeywordInstant),
    RelativeInstant { amount: f64, unit: String, direction: RelativeDirection },
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Postfix { op: PostfixOp, operand: Box<Expr> },
    Conditional { cond: Box<Expr>, then_branch: Box<Expr>, else_branch: Box<Expr> },
    FunctionCall { name: String, args: Vec<Expr> },
    Conversion { source: Box<Expr>, operator: ConversionOp, target: ConversionTarget },
    Grouped(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Total node count, used by resolver scoring rule 4 (spec §4.3).
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Count of unit terms across the whole tree, used by resolver scoring
    /// rule 1.
    pub fn total_unit_terms(&self) -> usize {
        let own = match &self.kind {
            ExprKind::MeasuredLiteral { unit, .. } => unit.numerator.len() + unit.denominator.len(),
            ExprKind::CompositeLiteral(parts) => parts.iter().map(|p| p.unit.numerator.len() + p.unit.denominator.len()).sum(),
            ExprKind::Conversion { target: ConversionTarget::Unit(u), .. } => u.numerator.len() + u.denominator.len(),
            ExprKind::Conversion { target: ConversionTarget::Composite(list), .. } => {
                list.iter().map(|u| u.numerator.len() + u.denominator.len()).sum()
            }
            _ => 0,
        };
        own + self.children().iter().map(|c| c.total_unit_terms()).sum::<usize>()
    }

    /// Count of conversion operators in the tree, used by resolver scoring
    /// rule 5.
    pub fn conversion_count(&self) -> usize {
        let own = usize::from(matches!(self.kind, ExprKind::Conversion { .. }));
        own + self.children().iter().map(|c| c.conversion_count()).sum::<usize>()
    }

    /// All unit-expression names that appear anywhere in the tree, used by
    /// resolver scoring rules 2 and 3.
    pub fn all_unit_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_unit_names(&mut names);
        names
    }

    fn collect_unit_names(&self, out: &mut Vec<String>) {
        let push_unit = |u: &UnitExpr, out: &mut Vec<String>| {
            for (name, _) in u.numerator.iter().chain(u.denominator.iter()) {
                out.push(name.clone());
            }
        };
        match &self.kind {
            ExprKind::MeasuredLiteral { unit, .. } => push_unit(unit, out),
            ExprKind::CompositeLiteral(parts) => {
                for p in parts {
                    push_unit(&p.unit, out);
                }
            }
            ExprKind::Conversion { target: ConversionTarget::Unit(u), .. } => push_unit(u, out),
            ExprKind::Conversion { target: ConversionTarget::Composite(list), .. } => {
                for u in list {
                    push_unit(u, out);
                }
            }
            _ => {}
        }
        for c in self.children() {
            c.collect_unit_names(out);
        }
    }

    fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::MeasuredLiteral { magnitude, .. } => vec![magnitude.as_ref()],
            ExprKind::PlainDateTimeLiteral { date, time } => vec![date.as_ref(), time.as_ref()],
            ExprKind::ZonedDateTimeLiteral { datetime, .. } => vec![datetime.as_ref()],
            ExprKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            ExprKind::Unary { operand, .. } => vec![operand.as_ref()],
            ExprKind::Postfix { operand, .. } => vec![operand.as_ref()],
            ExprKind::Conditional { cond, then_branch, else_branch } => vec![cond.as_ref(), then_branch.as_ref(), else_branch.as_ref()],
            ExprKind::FunctionCall { args, .. } => args.iter().collect(),
            ExprKind::Conversion { source, .. } => vec![source.as_ref()],
            ExprKind::Grouped(inner) => vec![inner.as_ref()],
            _ => vec![],
        }
    }
}

/// A whole input line's classification (spec §4.2 line-kind prefilter).
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Heading { level: u32, text: String },
    Empty,
    PlainText(String),
    Assignment { name: String, value: Expr },
    Expression(Expr),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(n: f64) -> Expr {
        Expr::new(ExprKind::NumericLiteral { value: n, base: NumericBase::Decimal, raw: n.to_string() }, Span::new(0, 0))
    }

    #[test]
    fn node_count_counts_children() {
        let tree = Expr::new(
            ExprKind::Binary { op: BinaryOp::Add, left: Box::new(leaf(1.0)), right: Box::new(leaf(2.0)) },
            Span::new(0, 3),
        );
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn total_unit_terms_counts_across_tree() {
        let measured = Expr::new(
            ExprKind::MeasuredLiteral { magnitude: Box::new(leaf(5.0)), unit: UnitExpr::single("meter") },
            Span::new(0, 5),
        );
        assert_eq!(measured.total_unit_terms(), 1);
    }

    #[test]
    fn conversion_count_is_recursive() {
        let inner = Expr::new(
            ExprKind::Conversion { source: Box::new(leaf(1.0)), operator: ConversionOp::To, target: ConversionTarget::Unit(UnitExpr::single("m")) },
            Span::new(0, 1),
        );
        let outer = Expr::new(
            ExprKind::Conversion { source: Box::new(inner), operator: ConversionOp::In, target: ConversionTarget::Unit(UnitExpr::single("cm")) },
            Span::new(0, 1),
        );
        assert_eq!(outer.conversion_count(), 2);
    }
}
