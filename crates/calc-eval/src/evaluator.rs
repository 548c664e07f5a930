//! Single-pass post-order evaluator (spec §4.8): each `Expr` node is
//! evaluated after its children, dispatching binary/unary/conditional/call
//! nodes against [`calc_value::Value`] and short-circuiting to
//! `Value::Error` rather than unwinding, per spec §3.1 invariant 5.

use std::time::{SystemTime, UNIX_EPOCH};

use calc_catalog::dimension as catalog_dimension;
use calc_catalog::Catalog;
use calc_lang::ast::{
    BinaryOp, ConversionOp, ConversionTarget, Expr, ExprKind, KeywordInstant, Line, PostfixOp, PresentationFormat as AstFormat, RelativeDirection,
    UnaryOp,
};
use calc_value::calendar::{Duration, PlainDate, PlainDateTime, PlainTime};
use calc_value::currency::{self, ExchangeRates};
use calc_value::dimension;
use calc_value::format_spec::PresentationFormat;
use calc_value::Value;

use crate::environment::Environment;
use crate::unit_resolve::resolve_unit_expr;

/// Unit bare (unitless) numbers are interpreted in for trigonometric
/// function arguments and results (spec §6.3). A `Quantity` argument
/// already carries its own unit and converts through the catalog as
/// usual; this only affects numbers with no unit attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Degree,
    Radian,
}

impl Default for AngleUnit {
    fn default() -> Self {
        AngleUnit::Degree
    }
}

const TRIG_INPUT: &[&str] = &["sin", "cos", "tan"];
const TRIG_OUTPUT: &[&str] = &["asin", "acos", "atan", "atan2"];

pub struct Evaluator<'a> {
    pub catalog: &'a dyn Catalog,
    pub rates: Option<&'a ExchangeRates>,
    pub angle_unit: AngleUnit,
}

impl<'a> Evaluator<'a> {
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Evaluator { catalog, rates: None, angle_unit: AngleUnit::default() }
    }

    pub fn with_rates(catalog: &'a dyn Catalog, rates: &'a ExchangeRates) -> Self {
        Evaluator { catalog, rates: Some(rates), angle_unit: AngleUnit::default() }
    }

    pub fn with_angle_unit(mut self, angle_unit: AngleUnit) -> Self {
        self.angle_unit = angle_unit;
        self
    }

    /// Evaluates one classified line, binding the result into `env` for an
    /// [`Line::Assignment`].
    pub fn evaluate_line(&self, line: &Line, env: &mut Environment) -> Option<Value> {
        match line {
            Line::Heading { .. } | Line::Empty | Line::PlainText(_) => None,
            Line::Assignment { name, value } => {
                let result = self.eval(value, env);
                env.bind(name.clone(), result.clone());
                Some(result)
            }
            Line::Expression(expr) => Some(self.eval(expr, env)),
        }
    }

    pub fn eval(&self, expr: &Expr, env: &Environment) -> Value {
        match &expr.kind {
            ExprKind::NumericLiteral { value, .. } => Value::Number(*value),
            ExprKind::BooleanLiteral(b) => Value::Boolean(*b),
            ExprKind::ConstantRef(name) => self.eval_constant(name),
            ExprKind::VariableRef(name) => env.get(name).cloned().unwrap_or_else(|| Value::Error(format!("undefined variable `{name}`"))),
            ExprKind::MeasuredLiteral { magnitude, unit } => {
                let mag = self.eval(magnitude, env);
                self.eval_measured(&mag, unit)
            }
            ExprKind::CompositeLiteral(parts) => self.eval_composite(parts),
            ExprKind::PlainDateLiteral { year, month, day } => match PlainDate::new(*year, *month, *day) {
                Ok(d) => Value::PlainDate(d),
                Err(e) => Value::Error(e.to_string()),
            },
            ExprKind::PlainTimeLiteral { hour, minute, second, millisecond } => match PlainTime::new(*hour, *minute, *second, *millisecond) {
                Ok(t) => Value::PlainTime(t),
                Err(e) => Value::Error(e.to_string()),
            },
            ExprKind::PlainDateTimeLiteral { date, time } => {
                let d = self.eval(date, env);
                let t = self.eval(time, env);
                match (d, t) {
                    (Value::PlainDate(date), Value::PlainTime(time)) => Value::PlainDateTime(PlainDateTime { date, time }),
                    (Value::Error(e), _) | (_, Value::Error(e)) => Value::Error(e),
                    _ => Value::Error("expected a date and a time".to_string()),
                }
            }
            ExprKind::ZonedDateTimeLiteral { datetime, zone } => {
                let dt = self.eval(datetime, env);
                match dt {
                    Value::PlainDateTime(datetime) => match self.catalog.resolve_timezone(zone) {
                        Some(resolved) => Value::ZonedDateTime(calc_value::calendar::ZonedDateTime { datetime, zone: resolved.to_string(), offset_minutes: 0 }),
                        None => Value::Error(format!("unknown time zone `{zone}`")),
                    },
                    other => other,
                }
            }
            ExprKind::InstantLiteral(nanos) => Value::Instant(*nanos),
            ExprKind::KeywordInstant(kind) => self.eval_keyword_instant(*kind),
            ExprKind::RelativeInstant { amount, unit, direction } => self.eval_relative_instant(*amount, unit, *direction),
            ExprKind::Binary { op, left, right } => {
                let l = self.eval(left, env);
                let r = self.eval(right, env);
                self.eval_binary(*op, l, r)
            }
            ExprKind::Unary { op, operand } => {
                let v = self.eval(operand, env);
                self.eval_unary(*op, v)
            }
            ExprKind::Postfix { op, operand } => {
                let v = self.eval(operand, env);
                self.eval_postfix(*op, v)
            }
            ExprKind::Conditional { cond, then_branch, else_branch } => match self.eval(cond, env) {
                Value::Boolean(true) => self.eval(then_branch, env),
                Value::Boolean(false) => self.eval(else_branch, env),
                Value::Error(e) => Value::Error(e),
                other => Value::Error(format!("condition must be boolean, found {}", other.type_name())),
            },
            ExprKind::FunctionCall { name, args } => {
                let values: Vec<Value> = args.iter().map(|a| self.eval(a, env)).collect();
                self.eval_call(name, values)
            }
            ExprKind::Conversion { source, operator, target } => {
                let v = self.eval(source, env);
                self.eval_conversion(v, *operator, target)
            }
            ExprKind::Grouped(inner) => self.eval(inner, env),
        }
    }

    fn eval_constant(&self, name: &str) -> Value {
        self.catalog
            .constants()
            .iter()
            .find(|c| c.name == name || c.aliases.iter().any(|a| a == name))
            .map(|c| Value::Number(c.value))
            .unwrap_or_else(|| Value::Error(format!("undefined constant `{name}`")))
    }

    fn eval_measured(&self, magnitude: &Value, unit_expr: &calc_lang::ast::UnitExpr) -> Value {
        let raw = match magnitude {
            Value::Number(n) => *n,
            Value::Error(e) => return Value::Error(e.clone()),
            other => return Value::Error(format!("expected a number before a unit, found {}", other.type_name())),
        };
        match resolve_unit_expr(self.catalog, unit_expr) {
            Ok(resolved) => {
                // An ambiguous symbol (`$`, `£`, `¥`) keeps its own
                // dimension id for as long as the value lives rather than
                // guessing which currency it denotes; see `add_currency`
                // and `eval_unit_conversion` for what that id then blocks.
                if self.catalog.is_ambiguous_currency_symbol(&resolved.id) {
                    return Value::Currency { amount: raw, code: catalog_dimension::currency_symbol(&resolved.id) };
                }
                if unit_expr.numerator.first().is_some_and(|(name, _)| self.catalog.currency_by_code(name).is_some()) {
                    return Value::Currency { amount: raw, code: unit_expr.numerator[0].0.clone() };
                }
                Value::Quantity { magnitude: resolved.to_canonical(raw), unit_id: resolved.id, dimension: resolved.dimension }
            }
            Err(e) => Value::Error(e),
        }
    }

    fn eval_composite(&self, parts: &[calc_lang::ast::MeasuredLiteralValue]) -> Value {
        let mut total_canonical = 0.0;
        let mut dimension = dimension::dimensionless();
        let mut display_unit = String::new();
        for (i, part) in parts.iter().enumerate() {
            match resolve_unit_expr(self.catalog, &part.unit) {
                Ok(resolved) => {
                    if i == 0 {
                        dimension = resolved.dimension.clone();
                        display_unit = resolved.id.clone();
                    } else if resolved.dimension != dimension {
                        return Value::Error("composite measurement terms must share a dimension".to_string());
                    }
                    total_canonical += resolved.to_canonical(part.magnitude);
                }
                Err(e) => return Value::Error(e),
            }
        }
        Value::Quantity { magnitude: total_canonical, unit_id: display_unit, dimension }
    }

    fn eval_keyword_instant(&self, kind: KeywordInstant) -> Value {
        let now_nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as i64).unwrap_or(0);
        match kind {
            KeywordInstant::Now => Value::Instant(now_nanos),
            KeywordInstant::Today => Value::PlainDate(PlainDate::from_epoch_days(now_nanos / 86_400_000_000_000)),
            KeywordInstant::Yesterday => Value::PlainDate(PlainDate::from_epoch_days(now_nanos / 86_400_000_000_000 - 1)),
            KeywordInstant::Tomorrow => Value::PlainDate(PlainDate::from_epoch_days(now_nanos / 86_400_000_000_000 + 1)),
        }
    }

    fn eval_relative_instant(&self, amount: f64, unit_name: &str, direction: RelativeDirection) -> Value {
        let resolved = match self.catalog.unit_by_name(unit_name) {
            Some(u) if u.dimension_id == calc_catalog::types::dimension::TIME => u,
            _ => return Value::Error(format!("`{unit_name}` is not a time unit")),
        };
        let seconds = amount * resolved.factor_to_canonical;
        let signed = match direction {
            RelativeDirection::Ago => -seconds,
            RelativeDirection::FromNow => seconds,
        };
        let now_nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as i64).unwrap_or(0);
        Value::Instant(now_nanos + (signed * 1_000_000_000.0) as i64)
    }

    fn eval_binary(&self, op: BinaryOp, l: Value, r: Value) -> Value {
        if let Value::Error(e) = l {
            return Value::Error(e);
        }
        if let Value::Error(e) = r {
            return Value::Error(e);
        }
        use BinaryOp::*;
        match (op, l, r) {
            (Add, Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            (Sub, Value::Number(a), Value::Number(b)) => Value::Number(a - b),
            (Mul, Value::Number(a), Value::Number(b)) => Value::Number(a * b),
            (Div, Value::Number(a), Value::Number(b)) | (Per, Value::Number(a), Value::Number(b)) => {
                if b == 0.0 {
                    Value::Error("division by zero".to_string())
                } else {
                    Value::Number(a / b)
                }
            }
            (Mod, Value::Number(a), Value::Number(b)) => Value::Number(a % b),
            (Pow, Value::Number(a), Value::Number(b)) => Value::Number(a.powf(b)),

            (Add, Value::Quantity { magnitude: a, dimension: da, unit_id }, Value::Quantity { magnitude: b, dimension: db, .. }) => {
                if da == db {
                    Value::Quantity { magnitude: a + b, dimension: da, unit_id }
                } else {
                    Value::Error(format!("incompatible dimensions: `{da:?}` and `{db:?}`"))
                }
            }
            (Sub, Value::Quantity { magnitude: a, dimension: da, unit_id }, Value::Quantity { magnitude: b, dimension: db, .. }) => {
                if da == db {
                    Value::Quantity { magnitude: a - b, dimension: da, unit_id }
                } else {
                    Value::Error(format!("incompatible dimensions: `{da:?}` and `{db:?}`"))
                }
            }
            (Mul, Value::Quantity { magnitude: a, dimension: da, unit_id: ua }, Value::Quantity { magnitude: b, dimension: db, unit_id: ub }) => {
                let dim = dimension::multiply(&da, &db);
                let magnitude = a * b;
                if dimension::is_dimensionless(&dim) {
                    Value::Number(magnitude)
                } else {
                    Value::Quantity { magnitude, dimension: dim, unit_id: format!("{ua}\u{b7}{ub}") }
                }
            }
            (Div, Value::Quantity { magnitude: a, dimension: da, unit_id: ua }, Value::Quantity { magnitude: b, dimension: db, unit_id: ub })
            | (Per, Value::Quantity { magnitude: a, dimension: da, unit_id: ua }, Value::Quantity { magnitude: b, dimension: db, unit_id: ub }) => {
                if b == 0.0 {
                    return Value::Error("division by zero".to_string());
                }
                let dim = dimension::divide(&da, &db);
                let magnitude = a / b;
                if dimension::is_dimensionless(&dim) {
                    Value::Number(magnitude)
                } else {
                    Value::Quantity { magnitude, dimension: dim, unit_id: format!("{ua}/{ub}") }
                }
            }
            (Mul, Value::Quantity { magnitude, dimension, unit_id }, Value::Number(n)) | (Mul, Value::Number(n), Value::Quantity { magnitude, dimension, unit_id }) => {
                Value::Quantity { magnitude: magnitude * n, dimension, unit_id }
            }
            (Div, Value::Quantity { magnitude, dimension, unit_id }, Value::Number(n)) => {
                if n == 0.0 {
                    Value::Error("division by zero".to_string())
                } else {
                    Value::Quantity { magnitude: magnitude / n, dimension, unit_id }
                }
            }

            (Add, Value::Currency { amount: a, code }, Value::Currency { amount: b, code: code2 }) => self.add_currency(a, code, b, code2),
            (Sub, Value::Currency { amount: a, code }, Value::Currency { amount: b, code: code2 }) => self.add_currency(a, code, -b, code2),
            (Mul, Value::Currency { amount, code }, Value::Number(n)) | (Mul, Value::Number(n), Value::Currency { amount, code }) => {
                Value::Currency { amount: amount * n, code }
            }
            (Div, Value::Currency { amount, code }, Value::Number(n)) => Value::Currency { amount: amount / n, code },

            (Add, Value::Duration(a), Value::Duration(b)) => Value::Duration(Duration { nanos: a.nanos + b.nanos }),
            (Sub, Value::Duration(a), Value::Duration(b)) => Value::Duration(Duration { nanos: a.nanos - b.nanos }),
            (Add, Value::PlainDate(d), Value::Duration(dur)) | (Add, Value::Duration(dur), Value::PlainDate(d)) => {
                Value::PlainDate(d.add_days(dur.nanos / 86_400_000_000_000))
            }
            (Sub, Value::PlainDate(d), Value::Duration(dur)) => Value::PlainDate(d.add_days(-(dur.nanos / 86_400_000_000_000))),
            (Sub, Value::PlainDate(a), Value::PlainDate(b)) => Value::Duration(Duration { nanos: a.days_since(b) * 86_400_000_000_000 }),
            (Add, Value::PlainDateTime(dt), Value::Duration(dur)) | (Add, Value::Duration(dur), Value::PlainDateTime(dt)) => {
                Value::PlainDateTime(dt.add_millis(dur.nanos / 1_000_000))
            }
            (Sub, Value::PlainDateTime(dt), Value::Duration(dur)) => Value::PlainDateTime(dt.add_millis(-(dur.nanos / 1_000_000))),
            (Sub, Value::PlainDateTime(a), Value::PlainDateTime(b)) => {
                Value::Duration(Duration { nanos: (a.to_epoch_millis() - b.to_epoch_millis()) * 1_000_000 })
            }
            (Add, Value::Instant(i), Value::Duration(dur)) | (Add, Value::Duration(dur), Value::Instant(i)) => Value::Instant(i + dur.nanos),
            (Sub, Value::Instant(i), Value::Duration(dur)) => Value::Instant(i - dur.nanos),
            (Sub, Value::Instant(a), Value::Instant(b)) => Value::Duration(Duration { nanos: a - b }),

            (And, Value::Boolean(a), Value::Boolean(b)) => Value::Boolean(a && b),
            (Or, Value::Boolean(a), Value::Boolean(b)) => Value::Boolean(a || b),
            (Xor, Value::Boolean(a), Value::Boolean(b)) => Value::Boolean(a ^ b),
            (BitAnd, Value::Number(a), Value::Number(b)) => Value::Number(((a as i64) & (b as i64)) as f64),
            (BitOr, Value::Number(a), Value::Number(b)) => Value::Number(((a as i64) | (b as i64)) as f64),
            (Xor, Value::Number(a), Value::Number(b)) => Value::Number(((a as i64) ^ (b as i64)) as f64),
            (Shl, Value::Number(a), Value::Number(b)) => Value::Number(((a as i64) << (b as i64)) as f64),
            (Shr, Value::Number(a), Value::Number(b)) => Value::Number(((a as i64) >> (b as i64)) as f64),

            (Eq, a, b) => Value::Boolean(values_equal(&a, &b)),
            (NotEq, a, b) => Value::Boolean(!values_equal(&a, &b)),
            (Lt, a, b) => compare(&a, &b, |o| o == std::cmp::Ordering::Less),
            (LtEq, a, b) => compare(&a, &b, |o| o != std::cmp::Ordering::Greater),
            (Gt, a, b) => compare(&a, &b, |o| o == std::cmp::Ordering::Greater),
            (GtEq, a, b) => compare(&a, &b, |o| o != std::cmp::Ordering::Less),

            (op, a, b) => Value::Error(format!("`{op:?}` is not defined for {} and {}", a.type_name(), b.type_name())),
        }
    }

    fn add_currency(&self, a: f64, code_a: String, b: f64, code_b: String) -> Value {
        if code_a == code_b {
            return Value::Currency { amount: a + b, code: code_a };
        }
        if currency::is_ambiguous_code(&code_a) || currency::is_ambiguous_code(&code_b) {
            return Value::Error(currency::ambiguous_error(&code_a, &code_b).to_string());
        }
        match self.rates {
            Some(rates) => match currency::convert(b, &code_b, &code_a, rates) {
                Ok(converted) => Value::Currency { amount: a + converted, code: code_a },
                Err(e) => Value::Error(e.to_string()),
            },
            None => Value::Error(format!("no exchange rate from `{code_b}` to `{code_a}`")),
        }
    }

    fn eval_unary(&self, op: UnaryOp, v: Value) -> Value {
        match (op, v) {
            (UnaryOp::Neg, Value::Number(n)) => Value::Number(-n),
            (UnaryOp::Neg, Value::Quantity { magnitude, dimension, unit_id }) => Value::Quantity { magnitude: -magnitude, dimension, unit_id },
            (UnaryOp::Neg, Value::Currency { amount, code }) => Value::Currency { amount: -amount, code },
            (UnaryOp::Neg, Value::Duration(d)) => Value::Duration(d.negate()),
            (UnaryOp::Not, Value::Boolean(b)) => Value::Boolean(!b),
            (UnaryOp::BitNot, Value::Number(n)) => Value::Number(!(n as i64) as f64),
            (_, Value::Error(e)) => Value::Error(e),
            (op, v) => Value::Error(format!("`{op:?}` is not defined for {}", v.type_name())),
        }
    }

    fn eval_postfix(&self, op: PostfixOp, v: Value) -> Value {
        match (op, v) {
            (PostfixOp::Factorial, Value::Number(n)) => {
                if n < 0.0 || n.fract() != 0.0 {
                    Value::Error("factorial requires a nonnegative integer".to_string())
                } else {
                    let mut result = 1.0f64;
                    let mut i = 2.0f64;
                    while i <= n {
                        result *= i;
                        i += 1.0;
                    }
                    Value::Number(result)
                }
            }
            (_, Value::Error(e)) => Value::Error(e),
            (op, v) => Value::Error(format!("`{op:?}` is not defined for {}", v.type_name())),
        }
    }

    fn eval_call(&self, name: &str, args: Vec<Value>) -> Value {
        if let Some(err) = args.iter().find_map(|a| if let Value::Error(e) = a { Some(e.clone()) } else { None }) {
            return Value::Error(err);
        }
        let Some(function) = self.catalog.math_function(name) else {
            return Value::Error(format!("undefined function `{name}`"));
        };
        if !function.arity.accepts(args.len()) {
            return Value::Error(format!("`{name}` called with {} argument(s)", args.len()));
        }
        // Bare numbers feed trig functions in the configured angle unit;
        // a `Quantity` argument already carries its own unit and is always
        // canonical (radians), so it is left untouched.
        let all_bare_numbers = args.iter().all(|a| matches!(a, Value::Number(_)));
        let degrees_in = self.angle_unit == AngleUnit::Degree && all_bare_numbers && TRIG_INPUT.contains(&name);
        let degrees_out = self.angle_unit == AngleUnit::Degree && all_bare_numbers && TRIG_OUTPUT.contains(&name);
        let numeric: Option<Vec<f64>> = args
            .iter()
            .map(|a| match a {
                Value::Number(n) if degrees_in => Some(n.to_radians()),
                Value::Number(n) => Some(*n),
                Value::Quantity { magnitude, .. } => Some(*magnitude),
                _ => None,
            })
            .collect();
        match numeric {
            Some(values) => match (function.call)(&values) {
                Some(result) if degrees_out => Value::Number(result.to_degrees()),
                Some(result) => Value::Number(result),
                None => Value::Error(format!("`{name}` is undefined at the given argument(s)")),
            },
            None => Value::Error(format!("`{name}` expects numeric arguments")),
        }
    }

    fn eval_conversion(&self, v: Value, _operator: ConversionOp, target: &ConversionTarget) -> Value {
        if let Value::Error(e) = v {
            return Value::Error(e);
        }
        match target {
            ConversionTarget::Unit(unit_expr) => self.eval_unit_conversion(v, unit_expr),
            ConversionTarget::Composite(list) => self.eval_composite_conversion(v, list),
            ConversionTarget::Format(fmt) => Value::PresentationWrapped { inner: Box::new(v), format: map_format(fmt) },
        }
    }

    fn eval_unit_conversion(&self, v: Value, unit_expr: &calc_lang::ast::UnitExpr) -> Value {
        match v {
            Value::Quantity { magnitude, dimension, .. } => match resolve_unit_expr(self.catalog, unit_expr) {
                Ok(resolved) => {
                    if resolved.dimension != dimension {
                        Value::Error(format!("incompatible dimensions: `{dimension:?}` and `{:?}`", resolved.dimension))
                    } else {
                        // magnitude stays canonical (invariant 1); only the display hint changes.
                        Value::Quantity { magnitude, dimension: resolved.dimension.clone(), unit_id: resolved.id }
                    }
                }
                Err(e) => Value::Error(e),
            },
            Value::Currency { amount, code } => {
                let Some((target_code, _)) = unit_expr.numerator.first() else {
                    return Value::Error("expected a currency code".to_string());
                };
                if currency::is_ambiguous_code(&code) || self.catalog.is_ambiguous_currency_symbol(target_code) {
                    return Value::Error(currency::ambiguous_error(&code, &catalog_dimension::currency_symbol(target_code)).to_string());
                }
                match self.rates {
                    Some(rates) => match currency::convert(amount, &code, target_code, rates) {
                        Ok(converted) => Value::Currency { amount: converted, code: target_code.clone() },
                        Err(e) => Value::Error(e.to_string()),
                    },
                    None => Value::Error(format!("no exchange rate from `{code}` to `{target_code}`")),
                }
            }
            other => Value::Error(format!("cannot convert {}", other.type_name())),
        }
    }

    fn eval_composite_conversion(&self, v: Value, units: &[calc_lang::ast::UnitExpr]) -> Value {
        let Value::Quantity { magnitude, dimension, .. } = v else {
            return Value::Error(format!("cannot split {} into a composite unit breakdown", v.type_name()));
        };
        let mut remaining = magnitude;
        let mut parts = Vec::new();
        for unit_expr in units {
            match resolve_unit_expr(self.catalog, unit_expr) {
                Ok(resolved) => {
                    if resolved.dimension != dimension {
                        return Value::Error("composite target units must share the source's dimension".to_string());
                    }
                    let whole = if resolved.factor != 0.0 { (remaining / resolved.factor).trunc() } else { 0.0 };
                    parts.push((resolved.id.clone(), whole));
                    remaining -= whole * resolved.factor;
                }
                Err(e) => return Value::Error(e),
            }
        }
        if let Some(last) = parts.last_mut() {
            last.1 += remaining / resolve_unit_expr(self.catalog, units.last().unwrap()).map(|r| r.factor).unwrap_or(1.0);
        }
        Value::Quantity {
            magnitude,
            dimension,
            unit_id: parts.iter().map(|(id, n)| format!("{n} {id}")).collect::<Vec<_>>().join(" "),
        }
    }
}

fn map_format(fmt: &AstFormat) -> PresentationFormat {
    match fmt {
        AstFormat::Base(n) => PresentationFormat::Base(*n),
        AstFormat::Fraction => PresentationFormat::Fraction,
        AstFormat::Scientific(p) => PresentationFormat::Scientific(*p),
        AstFormat::Percentage => PresentationFormat::Percentage,
        AstFormat::Ordinal => PresentationFormat::Ordinal,
        AstFormat::Iso8601 => PresentationFormat::Iso8601,
        AstFormat::Rfc9557 => PresentationFormat::Rfc9557,
        AstFormat::Rfc2822 => PresentationFormat::Rfc2822,
        AstFormat::Unix => PresentationFormat::Unix,
        AstFormat::UnixMillis => PresentationFormat::UnixMillis,
        AstFormat::SigFigs(n) => PresentationFormat::SigFigs(*n),
        AstFormat::Decimals(n) => PresentationFormat::Decimals(*n),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Quantity { magnitude: x, dimension: dx, .. }, Value::Quantity { magnitude: y, dimension: dy, .. }) => dx == dy && x == y,
        (Value::Currency { amount: x, code: cx }, Value::Currency { amount: y, code: cy }) => cx == cy && x == y,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::PlainDate(x), Value::PlainDate(y)) => x == y,
        (Value::PlainTime(x), Value::PlainTime(y)) => x == y,
        (Value::PlainDateTime(x), Value::PlainDateTime(y)) => x == y,
        (Value::Instant(x), Value::Instant(y)) => x == y,
        (Value::Duration(x), Value::Duration(y)) => x == y,
        _ => false,
    }
}

fn compare(a: &Value, b: &Value, accept: fn(std::cmp::Ordering) -> bool) -> Value {
    let ordering = match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y),
        (Value::Quantity { magnitude: x, dimension: dx, .. }, Value::Quantity { magnitude: y, dimension: dy, .. }) if dx == dy => x.partial_cmp(y),
        (Value::Currency { amount: x, code: cx }, Value::Currency { amount: y, code: cy }) if cx == cy => x.partial_cmp(y),
        (Value::PlainDate(x), Value::PlainDate(y)) => x.partial_cmp(y),
        (Value::Instant(x), Value::Instant(y)) => x.partial_cmp(y),
        (Value::Duration(x), Value::Duration(y)) => x.partial_cmp(y),
        _ => None,
    };
    match ordering {
        Some(o) => Value::Boolean(accept(o)),
        None => Value::Error(format!("cannot compare {} and {}", a.type_name(), b.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_base::Span;
    use calc_catalog::BuiltinCatalog;
    use calc_lang::ast::{NumericBase, UnitExpr};

    fn num(n: f64) -> Expr {
        Expr::new(ExprKind::NumericLiteral { value: n, base: NumericBase::Decimal, raw: n.to_string() }, Span::new(0, 0))
    }

    #[test]
    fn evaluates_numeric_addition() {
        let catalog = BuiltinCatalog::new();
        let env = Environment::new();
        let evaluator = Evaluator::new(&catalog);
        let expr = Expr::new(ExprKind::Binary { op: BinaryOp::Add, left: Box::new(num(1.0)), right: Box::new(num(2.0)) }, Span::new(0, 0));
        assert_eq!(evaluator.eval(&expr, &env), Value::Number(3.0));
    }

    #[test]
    fn evaluates_measured_literal_and_conversion() {
        let catalog = BuiltinCatalog::new();
        let env = Environment::new();
        let evaluator = Evaluator::new(&catalog);
        let measured = Expr::new(ExprKind::MeasuredLiteral { magnitude: Box::new(num(5.0)), unit: UnitExpr::single("kilometer") }, Span::new(0, 0));
        let converted = Expr::new(
            ExprKind::Conversion { source: Box::new(measured), operator: ConversionOp::To, target: ConversionTarget::Unit(UnitExpr::single("meter")) },
            Span::new(0, 0),
        );
        let result = evaluator.eval(&converted, &env);
        assert!(matches!(result, Value::Quantity { magnitude, .. } if (magnitude - 5000.0).abs() < 1e-6));
    }

    #[test]
    fn incompatible_dimension_addition_produces_error() {
        let catalog = BuiltinCatalog::new();
        let env = Environment::new();
        let evaluator = Evaluator::new(&catalog);
        let a = Expr::new(ExprKind::MeasuredLiteral { magnitude: Box::new(num(5.0)), unit: UnitExpr::single("meter") }, Span::new(0, 0));
        let b = Expr::new(ExprKind::MeasuredLiteral { magnitude: Box::new(num(1.0)), unit: UnitExpr::single("second") }, Span::new(0, 0));
        let expr = Expr::new(ExprKind::Binary { op: BinaryOp::Add, left: Box::new(a), right: Box::new(b) }, Span::new(0, 0));
        assert!(matches!(evaluator.eval(&expr, &env), Value::Error(_)));
    }

    #[test]
    fn assignment_binds_variable_for_later_reference() {
        let catalog = BuiltinCatalog::new();
        let mut env = Environment::new();
        let evaluator = Evaluator::new(&catalog);
        let line = Line::Assignment { name: "x".to_string(), value: num(5.0) };
        evaluator.evaluate_line(&line, &mut env);
        let reference = Expr::new(ExprKind::VariableRef("x".to_string()), Span::new(0, 0));
        assert_eq!(evaluator.eval(&reference, &env), Value::Number(5.0));
    }

    #[test]
    fn conditional_short_circuits_on_boolean_condition() {
        let catalog = BuiltinCatalog::new();
        let env = Environment::new();
        let evaluator = Evaluator::new(&catalog);
        let expr = Expr::new(
            ExprKind::Conditional {
                cond: Box::new(Expr::new(ExprKind::BooleanLiteral(true), Span::new(0, 0))),
                then_branch: Box::new(num(1.0)),
                else_branch: Box::new(num(2.0)),
            },
            Span::new(0, 0),
        );
        assert_eq!(evaluator.eval(&expr, &env), Value::Number(1.0));
    }

    #[test]
    fn function_call_dispatches_to_catalog_math_function() {
        let catalog = BuiltinCatalog::new();
        let env = Environment::new();
        let evaluator = Evaluator::new(&catalog);
        let expr = Expr::new(ExprKind::FunctionCall { name: "sqrt".to_string(), args: vec![num(9.0)] }, Span::new(0, 0));
        assert_eq!(evaluator.eval(&expr, &env), Value::Number(3.0));
    }

    #[test]
    fn degree_angle_unit_converts_bare_number_trig_arguments() {
        let catalog = BuiltinCatalog::new();
        let env = Environment::new();
        let evaluator = Evaluator::new(&catalog).with_angle_unit(AngleUnit::Degree);
        let expr = Expr::new(ExprKind::FunctionCall { name: "sin".to_string(), args: vec![num(90.0)] }, Span::new(0, 0));
        match evaluator.eval(&expr, &env) {
            Value::Number(n) => assert!((n - 1.0).abs() < 1e-9),
            other => panic!("expected a number, got {other:?}"),
        }
    }

    fn dollars(amount: f64) -> Expr {
        Expr::new(ExprKind::MeasuredLiteral { magnitude: Box::new(num(amount)), unit: UnitExpr::single("$") }, Span::new(0, 0))
    }

    #[test]
    fn ambiguous_symbol_literal_carries_its_own_dimension_code() {
        let catalog = BuiltinCatalog::new();
        let env = Environment::new();
        let evaluator = Evaluator::new(&catalog);
        match evaluator.eval(&dollars(5.0), &env) {
            Value::Currency { amount, code } => {
                assert_eq!(amount, 5.0);
                assert_eq!(code, "currency_symbol_$");
            }
            other => panic!("expected a currency value, got {other:?}"),
        }
    }

    #[test]
    fn same_ambiguous_symbol_arithmetic_type_checks_without_rates() {
        let catalog = BuiltinCatalog::new();
        let env = Environment::new();
        let evaluator = Evaluator::new(&catalog);
        let expr = Expr::new(ExprKind::Binary { op: BinaryOp::Add, left: Box::new(dollars(5.0)), right: Box::new(dollars(3.0)) }, Span::new(0, 0));
        match evaluator.eval(&expr, &env) {
            Value::Currency { amount, code } => {
                assert_eq!(amount, 8.0);
                assert_eq!(code, "currency_symbol_$");
            }
            other => panic!("expected a currency value, got {other:?}"),
        }
    }

    #[test]
    fn cross_symbol_currency_arithmetic_is_unconditionally_ambiguous() {
        let catalog = BuiltinCatalog::new();
        let env = Environment::new();
        let rates = ExchangeRates::new("USD").with_rate("EUR", 0.9);
        let evaluator = Evaluator::with_rates(&catalog, &rates);
        let pounds = Expr::new(ExprKind::MeasuredLiteral { magnitude: Box::new(num(3.0)), unit: UnitExpr::single("£") }, Span::new(0, 0));
        let expr = Expr::new(ExprKind::Binary { op: BinaryOp::Add, left: Box::new(dollars(5.0)), right: Box::new(pounds) }, Span::new(0, 0));
        match evaluator.eval(&expr, &env) {
            Value::Error(message) => assert!(message.contains("ambiguous")),
            other => panic!("expected an ambiguous-currency error, got {other:?}"),
        }
    }

    #[test]
    fn converting_an_ambiguous_symbol_errors_even_with_rates_loaded() {
        let catalog = BuiltinCatalog::new();
        let env = Environment::new();
        let rates = ExchangeRates::new("USD").with_rate("EUR", 0.9);
        let evaluator = Evaluator::with_rates(&catalog, &rates);
        let expr = Expr::new(
            ExprKind::Conversion { source: Box::new(dollars(5.0)), operator: ConversionOp::To, target: ConversionTarget::Unit(UnitExpr::single("EUR")) },
            Span::new(0, 0),
        );
        match evaluator.eval(&expr, &env) {
            Value::Error(message) => assert!(message.contains("ambiguous")),
            other => panic!("expected an ambiguous-currency error, got {other:?}"),
        }
    }
}
