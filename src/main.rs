use typetable::{ColSelector, Column, RowSelector, Table};

fn main() {
    let table = Table::from_named_columns([
        ("id", Column::from(vec![1i64, 2, 3])),
        ("score", Column::from(vec![0.5f64, 0.9, 0.1])),
    ])
    .unwrap();

    let head = table.filter_rows(RowSelector::Range(0..2)).unwrap();
    assert_eq!(head.nrow(), 2);

    let ids = table.column(ColSelector::Name("id")).unwrap();
    assert_eq!(ids.as_ints(), Some(&[1, 2, 3][..]));

    assert!(table.column(ColSelector::Name("missing")).is_err());

    println!("✅ All tests passed!");
}
