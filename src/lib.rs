/*!
# Exam Top-Sheet Generator

A web service that turns a spreadsheet of student roll numbers and subject
enrollments into formatted Word documents, built in Rust.

## Overview

Exam offices upload an enrollment spreadsheet and get back ready-to-print
DOCX files: an attendance "top sheet" that bands students into groups of 200
present rolls with per-group absentee lists, and a subject-wise roster that
lays the matching rolls out in a 6-column grid across paginated sheets.

## Architecture

The service is a single request-response cycle with no state between
requests:

### HTTP Layer
- **Technologies**: Rust, axum, tower-http
- **Endpoints**:
  - `POST /generate` - attendance top sheet (fields: `excel`, `subjectCode`,
    `absentRolls`)
  - `POST /generate-subject-rolls` - subject-wise roster (fields: `excel`,
    `subjectCode`)

### Core Components
- Roll Extraction - reads the first sheet of the uploaded workbook and
  filters rows by subject code (calamine)
- Attendance Grouper - partitions the roll sequence into bands of 200
  present students, tracking absentees per band
- Range Compressor - collapses numerically contiguous present rolls into
  `start---end=count` tokens
- Pagination/Column Layout - maps flat roll lists onto a column-major
  6x48 grid per page
- Document Renderer - serializes groups and grids into styled, paginated
  DOCX buffers (docx-rs)

## Modules

- **grouping**: Attendance grouper and range compressor (the algorithmic core)
- **layout**: Page capacity and column-major grid arithmetic
- **loader**: Spreadsheet parsing and subject filtering
- **renderer**: DOCX serialization of top sheets and rosters
- **app**: Routing, multipart handling, and response assembly

## Design Highlights

- Pure functions over input sequences; no shared or global state
- Uploads live in scoped temporary files, removed on every exit path
- Every failure is terminal for its request: logged, answered with a
  generic 500 and fixed text
*/

pub mod app;
pub mod grouping;
pub mod layout;
pub mod loader;
pub mod renderer;

/// Re-export the core types to make them easier to use
pub use grouping::{Group, PRESENT_THRESHOLD, compress_ranges, group_by_present, range_text};
pub use layout::{COLUMNS, PAGE_CAPACITY, ROWS_PER_PAGE, column_major_grid, paginate};
