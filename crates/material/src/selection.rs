use ndarray::{Array1, Array2, ArrayViewD, aview0};

use crate::MaterialError;

/// Values read from, or written to, a selection of material data.
///
/// The variant follows the shape of the selection: a single chemical in a
/// single phase is a [`Scalar`](Selection::Scalar), one axis of positions is a
/// [`Vector`](Selection::Vector), and phases crossed with chemicals form a
/// [`Matrix`](Selection::Matrix).
///
/// When assigning, values are broadcast to the selection, so a scalar fills
/// every selected position and a vector fills every selected row.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Scalar(f64),
    Vector(Array1<f64>),
    Matrix(Array2<f64>),
}

impl Selection {
    /// Returns the value if this is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the values if this is a vector.
    #[must_use]
    pub fn as_vector(&self) -> Option<&Array1<f64>> {
        match self {
            Self::Vector(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the values if this is a matrix.
    #[must_use]
    pub fn as_matrix(&self) -> Option<&Array2<f64>> {
        match self {
            Self::Matrix(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the shape, with no axes for a scalar.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Scalar(_) => Vec::new(),
            Self::Vector(values) => values.shape().to_vec(),
            Self::Matrix(values) => values.shape().to_vec(),
        }
    }

    /// Returns the sum of all values.
    #[must_use]
    pub fn sum(&self) -> f64 {
        match self {
            Self::Scalar(value) => *value,
            Self::Vector(values) => values.sum(),
            Self::Matrix(values) => values.sum(),
        }
    }

    /// Broadcasts the values to `shape` and returns them in row-major order.
    pub(crate) fn broadcast(&self, shape: &[usize]) -> Result<Vec<f64>, MaterialError> {
        let view: ArrayViewD<'_, f64> = match self {
            Self::Scalar(value) => aview0(value).into_dyn(),
            Self::Vector(values) => values.view().into_dyn(),
            Self::Matrix(values) => values.view().into_dyn(),
        };

        view.broadcast(shape)
            .map(|broadcast| broadcast.iter().copied().collect())
            .ok_or_else(|| MaterialError::ShapeMismatch {
                expected: shape.to_vec(),
                found: self.shape(),
            })
    }
}

impl From<f64> for Selection {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Array1<f64>> for Selection {
    fn from(values: Array1<f64>) -> Self {
        Self::Vector(values)
    }
}

impl From<Vec<f64>> for Selection {
    fn from(values: Vec<f64>) -> Self {
        Self::Vector(Array1::from(values))
    }
}

impl<const N: usize> From<[f64; N]> for Selection {
    fn from(values: [f64; N]) -> Self {
        Self::Vector(Array1::from(values.to_vec()))
    }
}

impl From<Array2<f64>> for Selection {
    fn from(values: Array2<f64>) -> Self {
        Self::Matrix(values)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn scalar_fills_any_shape() -> Result<(), MaterialError> {
        let scalar = Selection::from(2.5);

        assert_eq!(scalar.broadcast(&[])?, vec![2.5]);
        assert_eq!(scalar.broadcast(&[3])?, vec![2.5; 3]);
        assert_eq!(scalar.broadcast(&[2, 2])?, vec![2.5; 4]);

        Ok(())
    }

    #[test]
    fn vector_broadcasts_across_rows() -> Result<(), MaterialError> {
        let vector = Selection::from([1.0, 2.0]);

        assert_eq!(vector.broadcast(&[2])?, vec![1.0, 2.0]);
        assert_eq!(vector.broadcast(&[3, 2])?, vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);

        Ok(())
    }

    #[test]
    fn incompatible_shapes_fail() {
        let vector = Selection::from(vec![1.0, 2.0, 3.0]);

        assert_eq!(
            vector.broadcast(&[2]),
            Err(MaterialError::ShapeMismatch {
                expected: vec![2],
                found: vec![3],
            })
        );
        assert!(vector.broadcast(&[]).is_err());

        let matrix = Selection::from(array![[1.0, 2.0], [3.0, 4.0]]);
        assert!(matrix.broadcast(&[2]).is_err());
    }

    #[test]
    fn accessors_match_variant() {
        let matrix = Selection::from(array![[1.0, 2.0], [3.0, 4.0]]);

        assert_eq!(matrix.shape(), vec![2, 2]);
        assert_eq!(matrix.sum(), 10.0);
        assert!(matrix.as_matrix().is_some());
        assert!(matrix.as_vector().is_none());
        assert_eq!(Selection::Scalar(1.5).as_scalar(), Some(1.5));
    }
}
