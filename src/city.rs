//! City: an immutable point in the plane.

/// A city with an identifier and a 2D coordinate.
///
/// Identity is by `id`. Ids are assigned by input order (0-based), so a
/// city's id is also its index in the problem's city list.
///
/// # Examples
///
/// ```
/// use u_tsp::City;
///
/// let c = City::new(0, 1.5, -2.0);
/// assert_eq!(c.id(), 0);
/// assert_eq!(c.x(), 1.5);
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    id: usize,
    x: f64,
    y: f64,
}

impl City {
    /// Creates a new city.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Builds a city list from coordinates, assigning ids by position.
    pub fn from_coordinates(coords: &[(f64, f64)]) -> Vec<City> {
        coords
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| City::new(id, x, y))
            .collect()
    }

    /// Returns the city identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another city.
    pub fn euclidean(&self, other: &City) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl PartialEq for City {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for City {}

impl std::hash::Hash for City {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coordinates_assigns_ids_by_order() {
        let cities = City::from_coordinates(&[(0.0, 0.0), (3.0, 4.0), (1.0, 1.0)]);
        let ids: Vec<usize> = cities.iter().map(City::id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(cities[1].x(), 3.0);
        assert_eq!(cities[1].y(), 4.0);
    }

    #[test]
    fn test_identity_by_id() {
        let a = City::new(7, 0.0, 0.0);
        let b = City::new(7, 9.0, 9.0);
        let c = City::new(8, 0.0, 0.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_euclidean() {
        let a = City::new(0, 0.0, 0.0);
        let b = City::new(1, 3.0, 4.0);
        assert!((a.euclidean(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_display_is_id() {
        assert_eq!(City::new(12, 0.0, 0.0).to_string(), "12");
    }
}
