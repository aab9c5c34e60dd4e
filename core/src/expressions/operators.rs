//! Arithmetic and relational operator implementations.

/// Divisor substituted for zero so that division saturates instead of failing.
pub const DIVISION_EPSILON: f64 = 1e-7;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithmeticOp {
    pub(super) fn from_tag(tag: char) -> Option<Self> {
        match tag {
            '+' => Some(ArithmeticOp::Add),
            '-' => Some(ArithmeticOp::Sub),
            '*' => Some(ArithmeticOp::Mul),
            'd' => Some(ArithmeticOp::Div),
            '%' => Some(ArithmeticOp::Mod),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
            ArithmeticOp::Mod => "%",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RelationalOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl RelationalOp {
    pub(super) fn from_tag(tag: char) -> Option<Self> {
        match tag {
            '=' => Some(RelationalOp::Eq),
            'n' => Some(RelationalOp::Ne),
            '<' => Some(RelationalOp::Lt),
            'l' => Some(RelationalOp::Le),
            '>' => Some(RelationalOp::Gt),
            'g' => Some(RelationalOp::Ge),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            RelationalOp::Eq => "==",
            RelationalOp::Ne => "!=",
            RelationalOp::Lt => "<",
            RelationalOp::Le => "<=",
            RelationalOp::Gt => ">",
            RelationalOp::Ge => ">=",
        }
    }
}

/// Evaluate an arithmetic operation on two decimals.
///
/// Division by zero divides by [`DIVISION_EPSILON`]. The remainder truncates
/// both operands to integers first; a zero divisor there yields zero.
pub(super) fn eval_arithmetic(op: ArithmeticOp, left: f64, right: f64) -> f64 {
    match op {
        ArithmeticOp::Add => left + right,
        ArithmeticOp::Sub => left - right,
        ArithmeticOp::Mul => left * right,
        ArithmeticOp::Div => {
            if right == 0.0 {
                left / DIVISION_EPSILON
            } else {
                left / right
            }
        }
        ArithmeticOp::Mod => {
            let (left, right) = (left as i64, right as i64);
            left.checked_rem(right).unwrap_or(0) as f64
        }
    }
}

pub(super) fn eval_relational(op: RelationalOp, left: f64, right: f64) -> bool {
    match op {
        RelationalOp::Eq => left == right,
        RelationalOp::Ne => left != right,
        RelationalOp::Lt => left < right,
        RelationalOp::Le => left <= right,
        RelationalOp::Gt => left > right,
        RelationalOp::Ge => left >= right,
    }
}
