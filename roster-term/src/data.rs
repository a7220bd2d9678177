//! Generated attendance records for the demo.

use std::cmp::Ordering;
use std::fmt;

use roster::{Alignment, CellError, ColumnDef, SortDirection, SortState};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Linus", "Margaret", "Dennis", "Barbara", "Ken", "Frances", "Edsger",
    "Radia", "Alan", "Hedy", "Niklaus", "Sophie", "Tim", "Katherine", "Guido", "Annie",
    "Bjarne", "Mary",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Torvalds", "Hamilton", "Ritchie", "Liskov", "Thompson", "Allen",
    "Dijkstra", "Perlman", "Turing", "Lamarr", "Wirth", "Wilson", "Berners-Lee", "Johnson",
    "van Rossum", "Easley", "Stroustrup", "Keller",
];

const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Operations",
    "Finance",
    "Support",
    "Research",
    "Logistics",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Present,
    Remote,
    Leave,
    Absent,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Present => "present",
            Status::Remote => "remote",
            Status::Leave => "leave",
            Status::Absent => "absent",
        };
        f.write_str(label)
    }
}

/// One employee's attendance for the day.
#[derive(Debug, Clone)]
pub struct Attendance {
    pub id: u32,
    pub name: String,
    pub department: &'static str,
    pub status: Status,
    /// Missing when no timesheet was submitted.
    pub hours: Option<f32>,
}

/// Deterministic dataset of `count` records.
pub fn generate(count: usize) -> Vec<Attendance> {
    (0..count)
        .map(|i| {
            let id = u32::try_from(i).unwrap_or(u32::MAX);
            // Mix the index so neighbouring rows do not look alike.
            let mix = id.wrapping_mul(2_654_435_761);
            let first = FIRST_NAMES[(mix >> 3) as usize % FIRST_NAMES.len()];
            let last = LAST_NAMES[(mix >> 11) as usize % LAST_NAMES.len()];
            let status = match (mix >> 19) % 10 {
                0..=5 => Status::Present,
                6 | 7 => Status::Remote,
                8 => Status::Leave,
                _ => Status::Absent,
            };
            let hours = match status {
                _ if id % 97 == 13 => None,
                Status::Present | Status::Remote => Some(6.0 + ((mix >> 7) % 9) as f32 * 0.5),
                Status::Leave | Status::Absent => Some(0.0),
            };
            Attendance {
                id,
                name: format!("{} {}", first, last),
                department: DEPARTMENTS[(mix >> 23) as usize % DEPARTMENTS.len()],
                status,
                hours,
            }
        })
        .collect()
}

/// Column set for the attendance table.
pub fn columns() -> Vec<ColumnDef<Attendance>> {
    vec![
        ColumnDef::new("id", "ID", |a: &Attendance, _| format!("#{}", a.id))
            .width(8)
            .align(Alignment::Right),
        ColumnDef::new("name", "Name", |a: &Attendance, _| a.name.clone())
            .min_width(12)
            .sortable(),
        ColumnDef::new("department", "Department", |a: &Attendance, _| a.department)
            .min_width(10)
            .sortable(),
        ColumnDef::new("status", "Status", |a: &Attendance, _| a.status.to_string())
            .width(9)
            .align(Alignment::Center),
        ColumnDef::try_new("hours", "Hours", |a: &Attendance, _| match a.hours {
            Some(hours) => Ok(format!("{:.1}", hours)),
            None => Err(CellError::new(format!("no timesheet for #{}", a.id))),
        })
        .width(7)
        .align(Alignment::Right)
        .sortable(),
    ]
}

/// Reorder `data` to match `sort`. Without a sort the data goes back to id
/// order.
pub fn apply_sort(data: &mut [Attendance], sort: Option<&SortState>) {
    let Some(sort) = sort else {
        data.sort_by_key(|a| a.id);
        return;
    };

    let compare = |a: &Attendance, b: &Attendance| -> Ordering {
        let primary = match sort.key.as_str() {
            "name" => a.name.cmp(&b.name),
            "department" => a.department.cmp(b.department),
            "hours" => a
                .hours
                .unwrap_or(-1.0)
                .total_cmp(&b.hours.unwrap_or(-1.0)),
            _ => Ordering::Equal,
        };
        primary.then(a.id.cmp(&b.id))
    };

    match sort.direction {
        SortDirection::Ascending => data.sort_by(compare),
        SortDirection::Descending => data.sort_by(|a, b| compare(b, a)),
    }
}
