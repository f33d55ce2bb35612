use std::fmt;

use crate::ast::values::Value;

/// One entry of the projection list.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// A variable path, possibly sliced
    ///
    /// # Example
    /// ```text
    /// station.temp[0:2:10]
    /// ```
    Var(VarRef),

    /// A projection-function call
    ///
    /// # Example
    /// ```text
    /// mean(temp,depth)
    /// ```
    Call(FuncCall),
}

/// A dotted variable path, outermost segment first.
///
/// # Examples
/// ```text
/// Temperature
/// station.profile.temp
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VarRef {
    pub segments: Vec<Segment>,
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment.name)?;
            for slice in &segment.slices {
                write!(f, "{}", slice)?;
            }
        }
        Ok(())
    }
}

/// One path component plus zero or more per-dimension slices.
///
/// The name holds the *unescaped* identifier text (`%XX` escapes decoded).
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub name: String,
    pub slices: Vec<Slice>,
}

/// An inclusive index range with step, applied to one array dimension.
///
/// Written `[n]`, `[start:stop]`, or `[start:stride:stop]`. `[n]` is a
/// single-point slice (`start == stop == n`, `stride == 1`); `[a:b]` has
/// stride 1.
///
/// Invariants, enforced at construction: `start >= 0`, `stride > 0`,
/// `stop >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    start: i64,
    stride: i64,
    stop: i64,
}

impl Slice {
    /// Build a slice, rejecting invalid bounds with a reason string.
    pub fn new(start: i64, stride: i64, stop: i64) -> Result<Slice, &'static str> {
        if start < 0 {
            Err("start index is negative")
        } else if stride <= 0 {
            Err("stride must be positive")
        } else if stop < start {
            Err("stop index precedes start index")
        } else {
            Ok(Slice { start, stride, stop })
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn stride(&self) -> i64 {
        self.stride
    }

    pub fn stop(&self) -> i64 {
        self.stop
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.stop && self.stride == 1 {
            write!(f, "[{}]", self.start)
        } else if self.stride == 1 {
            write!(f, "[{}:{}]", self.start, self.stop)
        } else {
            write!(f, "[{}:{}:{}]", self.start, self.stride, self.stop)
        }
    }
}

/// A function call: projection function, boolean selection function, or a
/// function-valued clause operand.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncCall {
    pub name: String,
    pub args: Vec<Value>,
}
