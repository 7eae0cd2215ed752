//! Scalar arithmetic operators.
//!
//! Grid-with-grid arithmetic can fail on mismatched shapes and therefore
//! lives in the `try_*` methods on [`Grid`]; scalar arithmetic cannot fail
//! and is exposed through the standard operator traits.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use super::element::Element;
use super::grid::Grid;

macro_rules! scalar_op {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $sym:tt) => {
        impl<T: Element> $op_assign<T> for Grid<T> {
            fn $method_assign(&mut self, rhs: T) {
                for v in self.as_mut_slice() {
                    *v = *v $sym rhs;
                }
            }
        }

        impl<T: Element> $op<T> for Grid<T> {
            type Output = Grid<T>;

            fn $method(mut self, rhs: T) -> Grid<T> {
                self.$method_assign(rhs);
                self
            }
        }

        impl<T: Element> $op<T> for &Grid<T> {
            type Output = Grid<T>;

            fn $method(self, rhs: T) -> Grid<T> {
                self.map(|v| v $sym rhs)
            }
        }
    };
}

scalar_op!(Add, add, AddAssign, add_assign, +);
scalar_op!(Sub, sub, SubAssign, sub_assign, -);
scalar_op!(Mul, mul, MulAssign, mul_assign, *);
scalar_op!(Div, div, DivAssign, div_assign, /);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_operators() {
        let grid = Grid::filled(2, 2, 9.0f32);
        assert_eq!((&grid / 9.0).as_slice(), &[1.0; 4]);
        assert_eq!((&grid + 1.0).as_slice(), &[10.0; 4]);
        assert_eq!((grid.clone() - 4.0).as_slice(), &[5.0; 4]);
        assert_eq!((grid * 2.0).as_slice(), &[18.0; 4]);
    }

    #[test]
    fn test_scalar_assign_operators() {
        let mut grid = Grid::filled(1, 3, 12i32);
        grid /= 4;
        grid *= 5;
        grid -= 1;
        grid += 2;
        assert_eq!(grid.as_slice(), &[16, 16, 16]);
    }
}
