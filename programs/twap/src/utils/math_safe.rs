//! Checked arithmetic for oracle accounting.
//!
//! Every operation fails closed with a `TwapError` instead of wrapping or
//! saturating, so a single out-of-range update aborts the whole proxied
//! operation.

use anchor_lang::prelude::*;
use crate::error::TwapError;

pub trait SafeMath<T> {
    fn safe_add(self, v: T) -> Result<T>;
    fn safe_sub(self, v: T) -> Result<T>;
    fn safe_mul(self, v: T) -> Result<T>;
    fn safe_div(self, v: T) -> Result<T>;
}

macro_rules! impl_safe_math {
    ($type:ty) => {
        impl SafeMath<$type> for $type {
            fn safe_add(self, v: $type) -> Result<$type> {
                self.checked_add(v).ok_or_else(|| {
                    msg!("{} + {} exceeds {}", self, v, stringify!($type));
                    TwapError::ArithmeticOverflow.into()
                })
            }

            fn safe_sub(self, v: $type) -> Result<$type> {
                self.checked_sub(v).ok_or_else(|| {
                    msg!("{} - {} falls below {}::MIN", self, v, stringify!($type));
                    TwapError::ArithmeticUnderflow.into()
                })
            }

            fn safe_mul(self, v: $type) -> Result<$type> {
                self.checked_mul(v).ok_or_else(|| {
                    msg!("{} * {} exceeds {}", self, v, stringify!($type));
                    TwapError::ArithmeticOverflow.into()
                })
            }

            fn safe_div(self, v: $type) -> Result<$type> {
                if v == 0 {
                    msg!("{} / 0", self);
                    return Err(TwapError::DivisionByZero.into());
                }
                // only MIN / -1 on signed types can fail here
                self.checked_div(v).ok_or_else(|| {
                    msg!("{} / {} exceeds {}", self, v, stringify!($type));
                    TwapError::ArithmeticOverflow.into()
                })
            }
        }
    };
}

impl_safe_math!(u64);
impl_safe_math!(u128);
impl_safe_math!(i64);
