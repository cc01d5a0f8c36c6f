// ============================================================================
// Special Value Resolver
// Outcome tables for NaN, infinity and zero operands
// ============================================================================
//
// Every binary operation looks up a `Rule` indexed by the classes of its
// two operands before touching coefficients. The NaN rows and columns are
// shared: a signaling NaN wins over a quiet one, the first operand over the
// second. The 3x3 cores below list what each operation does for zero,
// finite and infinite operands.

use super::finalize::fix_nan;
use crate::domain::{Context, Decimal, Kind, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperandClass {
    Zero,
    Finite,
    Infinite,
    QuietNan,
    SignalingNan,
}

impl OperandClass {
    pub fn of(dec: &Decimal) -> Self {
        match dec.kind() {
            Kind::Finite if dec.is_zero() => OperandClass::Zero,
            Kind::Finite => OperandClass::Finite,
            Kind::Infinite => OperandClass::Infinite,
            Kind::QuietNan => OperandClass::QuietNan,
            Kind::SignalingNan => OperandClass::SignalingNan,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Add,
    Mul,
    Div,
    DivInt,
    Rem,
    DivMod,
    Compare,
    CompareSignal,
    MaxMin,
    Quantize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rule {
    /// Regular arithmetic on finite operands
    Compute,
    /// Quiet copy of the signaling NaN in `a`, `Invalid_operation`
    QuietA,
    QuietB,
    /// The quiet NaN passes through unchanged
    PropagateA,
    PropagateB,
    /// The quiet NaN passes through with `Invalid_operation`
    SignalA,
    SignalB,
    /// The other operand is a number and wins over a quiet NaN
    NumberA,
    NumberB,
    /// Plain NaN with `Invalid_operation`
    Invalid,
    /// Infinity with the sign of `a` (or `b`)
    InfinityA,
    InfinityB,
    /// Two infinities: same sign keeps it, opposite signs are invalid
    InfinitySum,
    /// Infinity with the product sign of the operands
    InfinitySigned,
    /// Finite nonzero divided by zero
    DivisionByZero,
    /// Zero divided by zero
    DivisionUndefined,
    /// Zero at the tiniest exponent, `Clamped`
    ZeroEtiny,
    /// Zero at exponent 0 with the product sign
    IntegerZero,
    /// `a` itself, finalized
    KeepA,
}

type Core = [[Rule; 3]; 3];

#[derive(Clone, Copy)]
enum NanPolicy {
    Propagate,
    Signal,
    PreferNumber,
}

use Rule::*;

const ADD: Core = [
    //  b: Zero     Finite     Infinite
    [Compute, Compute, InfinityB],    // a: Zero
    [Compute, Compute, InfinityB],    // a: Finite
    [InfinityA, InfinityA, InfinitySum], // a: Infinite
];

const MUL: Core = [
    [Compute, Compute, Invalid],
    [Compute, Compute, InfinitySigned],
    [Invalid, InfinitySigned, InfinitySigned],
];

const DIV: Core = [
    [DivisionUndefined, Compute, ZeroEtiny],
    [DivisionByZero, Compute, ZeroEtiny],
    [InfinitySigned, InfinitySigned, Invalid],
];

const DIV_INT: Core = [
    [DivisionUndefined, Compute, IntegerZero],
    [DivisionByZero, Compute, IntegerZero],
    [InfinitySigned, InfinitySigned, Invalid],
];

const REM: Core = [
    [DivisionUndefined, Compute, KeepA],
    [Invalid, Compute, KeepA],
    [Invalid, Invalid, Invalid],
];

const DIV_MOD: Core = [
    [DivisionUndefined, Compute, IntegerZero],
    [DivisionByZero, Compute, IntegerZero],
    [InfinitySigned, InfinitySigned, Invalid],
];

const ORDERED: Core = [[Compute; 3]; 3];

const QUANTIZE: Core = [
    [Compute, Compute, Invalid],
    [Compute, Compute, Invalid],
    [Invalid, Invalid, KeepA],
];

const fn with_nans(core: Core, policy: NanPolicy) -> [[Rule; 5]; 5] {
    let q = OperandClass::QuietNan.index();
    let s = OperandClass::SignalingNan.index();
    let mut table = [[Compute; 5]; 5];
    let mut i = 0;
    while i < 5 {
        let mut j = 0;
        while j < 5 {
            table[i][j] = if i == s {
                QuietA
            } else if j == s {
                QuietB
            } else if i == q && j == q {
                match policy {
                    NanPolicy::Signal => SignalA,
                    NanPolicy::Propagate | NanPolicy::PreferNumber => PropagateA,
                }
            } else if i == q {
                match policy {
                    NanPolicy::Propagate => PropagateA,
                    NanPolicy::Signal => SignalA,
                    NanPolicy::PreferNumber => NumberB,
                }
            } else if j == q {
                match policy {
                    NanPolicy::Propagate => PropagateB,
                    NanPolicy::Signal => SignalB,
                    NanPolicy::PreferNumber => NumberA,
                }
            } else {
                core[i][j]
            };
            j += 1;
        }
        i += 1;
    }
    table
}

const ADD_TABLE: [[Rule; 5]; 5] = with_nans(ADD, NanPolicy::Propagate);
const MUL_TABLE: [[Rule; 5]; 5] = with_nans(MUL, NanPolicy::Propagate);
const DIV_TABLE: [[Rule; 5]; 5] = with_nans(DIV, NanPolicy::Propagate);
const DIV_INT_TABLE: [[Rule; 5]; 5] = with_nans(DIV_INT, NanPolicy::Propagate);
const REM_TABLE: [[Rule; 5]; 5] = with_nans(REM, NanPolicy::Propagate);
const DIV_MOD_TABLE: [[Rule; 5]; 5] = with_nans(DIV_MOD, NanPolicy::Propagate);
const COMPARE_TABLE: [[Rule; 5]; 5] = with_nans(ORDERED, NanPolicy::Propagate);
const COMPARE_SIGNAL_TABLE: [[Rule; 5]; 5] = with_nans(ORDERED, NanPolicy::Signal);
const MAX_MIN_TABLE: [[Rule; 5]; 5] = with_nans(ORDERED, NanPolicy::PreferNumber);
const QUANTIZE_TABLE: [[Rule; 5]; 5] = with_nans(QUANTIZE, NanPolicy::Propagate);

/// Looks up the rule for an operation and its operands.
pub(crate) fn resolve(op: Op, a: &Decimal, b: &Decimal) -> Rule {
    let table = match op {
        Op::Add => &ADD_TABLE,
        Op::Mul => &MUL_TABLE,
        Op::Div => &DIV_TABLE,
        Op::DivInt => &DIV_INT_TABLE,
        Op::Rem => &REM_TABLE,
        Op::DivMod => &DIV_MOD_TABLE,
        Op::Compare => &COMPARE_TABLE,
        Op::CompareSignal => &COMPARE_SIGNAL_TABLE,
        Op::MaxMin => &MAX_MIN_TABLE,
        Op::Quantize => &QUANTIZE_TABLE,
    };
    table[OperandClass::of(a).index()][OperandClass::of(b).index()]
}

/// Applies a NaN rule. Returns `None` for rules that are not about NaNs.
pub(crate) fn nan_outcome(
    rule: Rule,
    a: &Decimal,
    b: &Decimal,
    ctx: &Context,
    status: &mut Status,
) -> Option<Decimal> {
    let nan = match rule {
        QuietA | SignalA => {
            *status |= Status::INVALID_OPERATION;
            a.quieted()
        },
        QuietB | SignalB => {
            *status |= Status::INVALID_OPERATION;
            b.quieted()
        },
        PropagateA => a.clone(),
        PropagateB => b.clone(),
        _ => return None,
    };
    Some(fix_nan(nan, ctx))
}

/// Single-operand NaN check: a signaling NaN becomes quiet with
/// `Invalid_operation`, a quiet NaN passes through.
pub(crate) fn check_nan(a: &Decimal, ctx: &Context, status: &mut Status) -> Option<Decimal> {
    match a.kind() {
        Kind::SignalingNan => {
            *status |= Status::INVALID_OPERATION;
            Some(fix_nan(a.quieted(), ctx))
        },
        Kind::QuietNan => Some(fix_nan(a.clone(), ctx)),
        Kind::Finite | Kind::Infinite => None,
    }
}

/// Two-operand NaN check with the shared precedence.
pub(crate) fn check_nans(
    a: &Decimal,
    b: &Decimal,
    ctx: &Context,
    status: &mut Status,
) -> Option<Decimal> {
    nan_outcome(resolve(Op::Add, a, b), a, b, ctx, status)
}

impl super::DecimalEngine {
    pub(crate) fn check_nan_kernel(
        &self,
        a: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Option<Decimal> {
        check_nan(a, ctx, status)
    }

    pub(crate) fn check_nans_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Option<Decimal> {
        check_nans(a, b, ctx, status)
    }
}

entry_points! {
    /// Returns the NaN result for a NaN operand, `None` for numbers.
    check_nan, check_nan_quiet => check_nan_kernel(a: &Decimal) -> Option<Decimal>;

    /// Returns the propagated NaN when either operand is a NaN.
    check_nans, check_nans_quiet => check_nans_kernel(a: &Decimal, b: &Decimal) -> Option<Decimal>;
}
