//! Euler rotation orders
//!
//! A joint's three rotation channels are composed in one of six orders. The
//! order is resolved once, when the skeleton is loaded, from the per-axis rank
//! vector the parser produces (value at axis index = rank in the product).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result, Vec3};

/// A principal axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in component order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index (x = 0, y = 1, z = 2)
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit basis vector
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Order in which the three axis rotations of an Euler triple are composed.
///
/// Variants are named by product order, outermost factor first: `Xyz` is
/// `X * Y * Z`, so a vector is rotated about Z first, then Y, then X. This is
/// the BVH channel listing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[i32; 3]", into = "[i32; 3]")]
pub enum RotationOrder {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl RotationOrder {
    /// Default order of the Unity engine, order vector `(1, 2, 0)`:
    /// `Z * X * Y`.
    pub const UNITY: RotationOrder = RotationOrder::Zxy;

    /// All six orders
    pub const ALL: [RotationOrder; 6] = [
        RotationOrder::Xyz,
        RotationOrder::Xzy,
        RotationOrder::Yxz,
        RotationOrder::Yzx,
        RotationOrder::Zxy,
        RotationOrder::Zyx,
    ];

    /// Axes in product order (first = outermost factor)
    pub fn composition_sequence(self) -> [Axis; 3] {
        use Axis::*;
        match self {
            RotationOrder::Xyz => [X, Y, Z],
            RotationOrder::Xzy => [X, Z, Y],
            RotationOrder::Yxz => [Y, X, Z],
            RotationOrder::Yzx => [Y, Z, X],
            RotationOrder::Zxy => [Z, X, Y],
            RotationOrder::Zyx => [Z, Y, X],
        }
    }

    /// Resolve an order from its product order
    pub fn from_composition_sequence(sequence: [Axis; 3]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|order| order.composition_sequence() == sequence)
    }

    /// Per-axis rank vector: entry `i` is the position of axis `i` in the product
    pub fn order_vector(self) -> [i32; 3] {
        let mut ranks = [0; 3];
        for (rank, axis) in self.composition_sequence().into_iter().enumerate() {
            ranks[axis.index()] = rank as i32;
        }
        ranks
    }

    /// Resolve an order from a per-axis rank vector.
    ///
    /// Fails with [`Error::InvalidRotationOrder`] unless the vector is a
    /// permutation of `(0, 1, 2)`.
    pub fn from_order_vector(ranks: [i32; 3]) -> Result<Self> {
        let mut sequence = [None; 3];
        for (axis, &rank) in Axis::ALL.iter().zip(ranks.iter()) {
            let rank = usize::try_from(rank).map_err(|_| Error::InvalidRotationOrder(ranks))?;
            match sequence.get_mut(rank) {
                Some(slot) if slot.is_none() => *slot = Some(*axis),
                _ => return Err(Error::InvalidRotationOrder(ranks)),
            }
        }
        match sequence {
            [Some(a), Some(b), Some(c)] => Self::from_composition_sequence([a, b, c])
                .ok_or(Error::InvalidRotationOrder(ranks)),
            _ => Err(Error::InvalidRotationOrder(ranks)),
        }
    }
}

impl Default for RotationOrder {
    fn default() -> Self {
        Self::UNITY
    }
}

impl TryFrom<[i32; 3]> for RotationOrder {
    type Error = Error;

    fn try_from(ranks: [i32; 3]) -> Result<Self> {
        Self::from_order_vector(ranks)
    }
}

impl From<RotationOrder> for [i32; 3] {
    fn from(order: RotationOrder) -> Self {
        order.order_vector()
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.composition_sequence();
        write!(f, "{:?}{:?}{:?}", a, b, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unity_order_vector() {
        assert_eq!(RotationOrder::UNITY.order_vector(), [1, 2, 0]);
        assert_eq!(
            RotationOrder::from_order_vector([1, 2, 0]).unwrap(),
            RotationOrder::Zxy
        );
    }

    #[test]
    fn test_order_vector_round_trip_all() {
        for order in RotationOrder::ALL {
            let ranks = order.order_vector();
            assert_eq!(RotationOrder::from_order_vector(ranks).unwrap(), order);
        }
    }

    #[test]
    fn test_rejects_non_permutation() {
        assert!(RotationOrder::from_order_vector([0, 0, 1]).is_err());
        assert!(RotationOrder::from_order_vector([0, 1, 3]).is_err());
        assert!(RotationOrder::from_order_vector([-1, 0, 1]).is_err());
    }

    #[test]
    fn test_composition_sequence() {
        assert_eq!(
            RotationOrder::Yzx.composition_sequence(),
            [Axis::Y, Axis::Z, Axis::X]
        );
        assert_eq!(
            RotationOrder::from_composition_sequence([Axis::Z, Axis::Y, Axis::X]),
            Some(RotationOrder::Zyx)
        );
        assert_eq!(
            RotationOrder::from_composition_sequence([Axis::X, Axis::X, Axis::Y]),
            None
        );
    }

    #[test]
    fn test_serde_as_order_vector() {
        let json = serde_json::to_string(&RotationOrder::UNITY).unwrap();
        assert_eq!(json, "[1,2,0]");
        let order: RotationOrder = serde_json::from_str("[0,1,2]").unwrap();
        assert_eq!(order, RotationOrder::Xyz);
        assert!(serde_json::from_str::<RotationOrder>("[2,2,2]").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(RotationOrder::Zxy.to_string(), "ZXY");
    }
}
