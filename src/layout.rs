/// Columns per roster page.
pub const COLUMNS: usize = 6;

/// Rows per roster page.
pub const ROWS_PER_PAGE: usize = 48;

/// Rolls that fit on one roster page.
pub const PAGE_CAPACITY: usize = COLUMNS * ROWS_PER_PAGE;

/// Split a flat roll list into fixed-capacity pages
///
/// Every page except possibly the last holds exactly `capacity` rolls. Empty
/// input produces zero pages.
///
/// # Arguments
/// * `rolls` - Full ordered roll list for the subject
/// * `capacity` - Grid capacity per page, must be non-zero
pub fn paginate(rolls: &[String], capacity: usize) -> Vec<Vec<String>> {
    debug_assert!(capacity > 0);
    rolls.chunks(capacity).map(|page| page.to_vec()).collect()
}

/// Lay one page out as a column-major grid
///
/// Index `i` within the page lands at column `i / rows`, row `i % rows`, so
/// each column fills top to bottom before the next one starts. Unfilled cells
/// stay empty.
///
/// # Examples
/// ```
/// use topsheet::layout::column_major_grid;
///
/// let page: Vec<String> = ["1", "2", "3", "4"].iter().map(|s| s.to_string()).collect();
/// let grid = column_major_grid(&page, 2, 3);
/// assert_eq!(grid[0], vec!["1", "4"]);
/// assert_eq!(grid[1], vec!["2", ""]);
/// assert_eq!(grid[2], vec!["3", ""]);
/// ```
pub fn column_major_grid(page: &[String], columns: usize, rows: usize) -> Vec<Vec<String>> {
    let mut grid = vec![vec![String::new(); columns]; rows];

    for (i, roll) in page.iter().enumerate() {
        let col = i / rows;
        let row = i % rows;
        if col < columns {
            grid[row][col] = roll.clone();
        }
    }

    grid
}
