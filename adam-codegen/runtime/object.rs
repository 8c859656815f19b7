#![allow(dead_code, unused_mut, unused_parens, unused_variables, unreachable_code)]

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Not, Sub};

/// A dynamically typed adam value.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Object {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl Object {
    /// `false`, `0` and `""` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Number(val) => *val != 0.0,
            Object::String(val) => !val.is_empty(),
            Object::Boolean(val) => *val,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Number(val) => write!(f, "{}", val),
            Object::String(val) => write!(f, "{}", val),
            Object::Boolean(val) => write!(f, "{}", val),
        }
    }
}

impl Add for Object {
    type Output = Object;

    fn add(self, rhs: Object) -> Object {
        match (self, rhs) {
            (Object::Number(lhs), Object::Number(rhs)) => Object::Number(lhs + rhs),
            (Object::String(lhs), rhs) => Object::String(format!("{}{}", lhs, rhs)),
            (lhs, Object::String(rhs)) => Object::String(format!("{}{}", lhs, rhs)),
            (lhs, rhs) => panic!("cannot add {:?} and {:?}", lhs, rhs),
        }
    }
}

/// Generate a numeric-only binary operator.
macro_rules! num_binary_op {
    ($trait: ident, $method: ident, $op: tt) => {
        impl $trait for Object {
            type Output = Object;

            fn $method(self, rhs: Object) -> Object {
                match (self, rhs) {
                    (Object::Number(lhs), Object::Number(rhs)) => Object::Number(lhs $op rhs),
                    (lhs, rhs) => panic!(
                        "operands of `{}` must be numbers, got {:?} and {:?}",
                        stringify!($op),
                        lhs,
                        rhs
                    ),
                }
            }
        }
    };
}

num_binary_op!(Sub, sub, -);
num_binary_op!(Mul, mul, *);
num_binary_op!(Div, div, /);

impl Neg for Object {
    type Output = Object;

    fn neg(self) -> Object {
        match self {
            Object::Number(val) => Object::Number(-val),
            val => panic!("operand of `-` must be a number, got {:?}", val),
        }
    }
}

impl Not for Object {
    type Output = Object;

    fn not(self) -> Object {
        Object::Boolean(!self.is_truthy())
    }
}
