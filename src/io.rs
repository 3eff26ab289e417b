//! Coordinate-file input and tour output.
//!
//! Input: one city per non-blank line, two whitespace-separated real
//! coordinates. Ids are assigned by line order among non-blank lines.
//! Output: the tour's coordinates in visiting order, one `x y` pair per line.

use crate::city::City;
use crate::error::{TspError, TspResult};
use crate::problem::TspProblem;
use crate::tour::Tour;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Parses cities from a reader.
pub fn read_cities<R: BufRead>(reader: R) -> TspResult<Vec<City>> {
    let mut cities = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let mut fields = line.split_whitespace();
        let Some(first) = fields.next() else {
            continue;
        };
        let second = fields.next().ok_or_else(|| TspError::Parse {
            line: line_no,
            message: "expected two coordinates, found one".into(),
        })?;
        if fields.next().is_some() {
            return Err(TspError::Parse {
                line: line_no,
                message: "expected two coordinates, found more".into(),
            });
        }
        let x = parse_coordinate(first, line_no)?;
        let y = parse_coordinate(second, line_no)?;
        cities.push(City::new(cities.len(), x, y));
    }
    Ok(cities)
}

fn parse_coordinate(field: &str, line: usize) -> TspResult<f64> {
    field.parse::<f64>().map_err(|e| TspError::Parse {
        line,
        message: format!("invalid coordinate '{field}': {e}"),
    })
}

/// Reads a coordinate file into a validated problem.
pub fn load_problem<P: AsRef<Path>>(path: P) -> TspResult<TspProblem> {
    let file = File::open(path)?;
    TspProblem::new(read_cities(BufReader::new(file))?)
}

/// Writes the tour's city coordinates in visiting order.
pub fn write_tour<W: Write>(tour: &Tour, problem: &TspProblem, mut writer: W) -> TspResult<()> {
    for city in tour.cities(problem) {
        writeln!(writer, "{:.6} {:.6}", city.x(), city.y())?;
    }
    writer.flush()?;
    Ok(())
}

/// Saves the tour's coordinates to a file, replacing it if present.
pub fn save_tour<P: AsRef<Path>>(tour: &Tour, problem: &TspProblem, path: P) -> TspResult<()> {
    let file = File::create(path)?;
    write_tour(tour, problem, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_cities() {
        let input = "0 0\n0.5 1e1\n\n  -3.25\t4  \n";
        let cities = read_cities(Cursor::new(input)).expect("valid input");
        assert_eq!(cities.len(), 3);
        assert_eq!(cities[1].y(), 10.0);
        assert_eq!(cities[2].id(), 2);
        assert_eq!(cities[2].x(), -3.25);
    }

    #[test]
    fn test_read_rejects_single_coordinate() {
        let err = read_cities(Cursor::new("1 2\n3\n")).unwrap_err();
        assert!(matches!(err, TspError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_read_rejects_extra_fields() {
        let err = read_cities(Cursor::new("1 2 3\n")).unwrap_err();
        assert!(matches!(err, TspError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_read_rejects_garbage() {
        let err = read_cities(Cursor::new("1 abc\n")).unwrap_err();
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_write_tour_in_visiting_order() {
        let problem =
            TspProblem::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).expect("valid");
        let tour = Tour::new(vec![2, 0, 1]);
        let mut out = Vec::new();
        write_tour(&tour, &problem, &mut out).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "1.000000 1.000000\n0.000000 0.000000\n1.000000 0.000000\n");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("cities.txt");
        std::fs::write(&input, "0 0\n0 1\n1 1\n1 0\n").expect("write input");

        let problem = load_problem(&input).expect("load");
        assert_eq!(problem.num_cities(), 4);

        let output = dir.path().join("tour.dat");
        save_tour(&Tour::new(vec![3, 2, 1, 0]), &problem, &output).expect("save");
        let reloaded = read_cities(BufReader::new(File::open(&output).expect("open")))
            .expect("reload");
        let xs: Vec<(f64, f64)> = reloaded.iter().map(|c| (c.x(), c.y())).collect();
        assert_eq!(xs, vec![(1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
    }

    #[test]
    fn test_load_too_few_cities() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("two.txt");
        std::fs::write(&input, "0 0\n1 1\n").expect("write input");
        assert!(matches!(
            load_problem(&input).unwrap_err(),
            TspError::TooFewCities(2)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_problem("/nonexistent/cities.txt").unwrap_err();
        assert!(matches!(err, TspError::Io(_)));
    }
}
