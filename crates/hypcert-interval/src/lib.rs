#![deny(missing_docs)]
#![doc = "Outward-rounded real and complex interval arithmetic on MPFR floats with an explicit, per-value working precision."]

/// Owned operands delegate to the by-reference implementations.
macro_rules! forward_owned_ops {
    ($ty:ident) => {
        forward_owned_ops!(@binary $ty, Add, add);
        forward_owned_ops!(@binary $ty, Sub, sub);
        forward_owned_ops!(@binary $ty, Mul, mul);
        forward_owned_ops!(@binary $ty, Div, div);

        impl ::std::ops::Neg for $ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                ::std::ops::Neg::neg(&self)
            }
        }
    };
    (@binary $ty:ident, $op:ident, $method:ident) => {
        impl ::std::ops::$op for $ty {
            type Output = $ty;

            fn $method(self, rhs: $ty) -> $ty {
                ::std::ops::$op::$method(&self, &rhs)
            }
        }

        impl ::std::ops::$op<&$ty> for $ty {
            type Output = $ty;

            fn $method(self, rhs: &$ty) -> $ty {
                ::std::ops::$op::$method(&self, rhs)
            }
        }
    };
}

mod complex;
mod precision;
mod real;

pub use complex::ComplexInterval;
pub use precision::{max_precision_bits, Precision, DOUBLE_PRECISION_BITS, MIN_PRECISION_BITS};
pub use real::Interval;
pub use rug::Float;
