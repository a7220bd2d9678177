use roster::layout::compute_layout;
use roster::row::{RowContext, render_row, render_row_into};
use roster::{Alignment, CellError, ColumnDef, RowBody};

struct Shift {
    name: &'static str,
    hours: Option<f32>,
}

fn columns() -> Vec<ColumnDef<Shift>> {
    vec![
        ColumnDef::new("name", "Name", |s: &Shift, _| s.name),
        ColumnDef::try_new("hours", "Hours", |s: &Shift, _| {
            s.hours
                .map(|h| format!("{:.1}", h))
                .ok_or_else(|| CellError::new("hours missing"))
        })
        .width(6)
        .align(Alignment::Right),
        ColumnDef::new("index", "#", |_: &Shift, index| index.to_string()).width(4),
    ]
}

#[test]
fn test_render_row_fits_cells_to_layout() {
    let columns = columns();
    let layout = compute_layout(&columns, 24).unwrap();
    let cx = RowContext {
        columns: &columns,
        layout: &layout,
        item_height: 3,
    };
    let item = Shift {
        name: "Ada Lovelace",
        hours: Some(7.5),
    };

    let row = render_row(&cx, &item, 4, 4usize, Some(false));

    assert_eq!(row.index, 4);
    assert_eq!(row.top, 12);
    assert_eq!(row.selected, Some(false));
    assert_eq!(row.cells(), &["Ada Lov…", "   7.5", "4   "]);
    assert!(row.fault().is_none());
}

#[test]
fn test_render_error_degrades_row() {
    let columns = columns();
    let layout = compute_layout(&columns, 24).unwrap();
    let cx = RowContext {
        columns: &columns,
        layout: &layout,
        item_height: 1,
    };
    let item = Shift {
        name: "Grace",
        hours: None,
    };

    let row = render_row(&cx, &item, 9, 9usize, None);

    let fault = row.fault().expect("row should carry a fault");
    assert_eq!(fault.index, 9);
    assert_eq!(fault.column, "hours");
    assert_eq!(fault.message, "hours missing");
    assert!(row.cells().is_empty());
}

#[test]
fn test_render_panic_degrades_row() {
    let columns = vec![ColumnDef::new("boom", "Boom", |_: &Shift, _| -> String {
        panic!("cell exploded")
    })];
    let layout = compute_layout(&columns, 10).unwrap();
    let cx = RowContext {
        columns: &columns,
        layout: &layout,
        item_height: 1,
    };
    let item = Shift {
        name: "x",
        hours: None,
    };

    let row = render_row(&cx, &item, 0, 0usize, None);
    let fault = row.fault().expect("panic should become a fault");
    assert_eq!(fault.column, "boom");
    assert_eq!(fault.message, "cell exploded");
}

#[test]
fn test_render_into_reuses_row_and_recovers_from_fault() {
    let columns = columns();
    let layout = compute_layout(&columns, 24).unwrap();
    let cx = RowContext {
        columns: &columns,
        layout: &layout,
        item_height: 1,
    };
    let broken = Shift {
        name: "Broken",
        hours: None,
    };
    let fine = Shift {
        name: "Fine",
        hours: Some(8.0),
    };

    let mut row = render_row(&cx, &broken, 0, 0usize, None);
    assert!(matches!(row.body, RowBody::Fault(_)));

    render_row_into(&cx, &mut row, &fine, 1, 1usize, Some(true));
    assert_eq!(row.index, 1);
    assert_eq!(row.key, 1);
    assert_eq!(row.top, 1);
    assert_eq!(row.selected, Some(true));
    assert_eq!(row.cells(), &["Fine    ", "   8.0", "1   "]);
}
