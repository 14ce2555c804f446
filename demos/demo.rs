use typetable::{
    ColSelector, Column, ColumnExpr, Relation, RowSelector, Table, Value, hcat, order, transform,
};

fn main() -> Result<(), typetable::Error> {
    println!("Type-Stable Table Demo\n");

    // Build the "users" table
    let users = Table::with_shape_hint(
        vec![
            Column::from(vec![1i64, 2, 3]),
            Column::from(vec!["Alice", "Bob", "Charlie"]),
            Column::from(vec![30i64, 17, 25]),
        ],
        vec!["id".into(), "name".into(), "age".into()],
        "users",
    )?;
    println!("Created table '{}' ({} rows)", users.shape().tag(), users.nrow());

    // Print it row by row
    println!("\n{:<5} {:<10} {:<5}", "ID", "NAME", "AGE");
    for row in 0..users.nrow() {
        if let Some(cells) = users.row(row) {
            println!(
                "{:<5} {:<10} {:<5}",
                cells[0].as_int().unwrap_or_default(),
                cells[1].as_str().unwrap_or_default(),
                cells[2].as_int().unwrap_or_default(),
            );
        }
    }

    // Filter the adults with a comparison mask
    let ages = users.column(ColSelector::Name("age"))?;
    let mask = ages.gt_value(&Value::Int(18)).unwrap_or_default();
    let adults = users.filter_rows(RowSelector::Mask(&mask))?;
    println!("\nAdults: {:?}", adults.column_by_name("name")?.as_texts());

    // Sort by age, youngest first
    let by_age = order(&users, |t| t.project(&[ColSelector::Name("age")]))?;
    println!("Youngest: {:?}", by_age.row(0));

    // Derive a new column from the whole table
    let with_next_age = transform(
        &users,
        vec![(
            "age_next_year".into(),
            ColumnExpr::computed(|t| {
                let ages = t.column_by_name("age")?.as_ints().unwrap_or_default();
                Ok(Column::from(
                    ages.iter().map(|a| a + 1).collect::<Vec<i64>>(),
                ))
            }),
        )],
    )?;
    println!("Columns after transform: {:?}", with_next_age.names());

    // Glue a second table on, column-wise
    let extra = Table::from_named_columns([(
        "city",
        Column::from(vec!["Paris", "Lyon", "Nice"]),
    )])?;
    let joined = hcat(&users, &extra)?;
    println!("Columns after hcat: {:?}", joined.names());

    // Hand it to a caller that only speaks plain relations
    let rel = joined.to_relation();
    println!("Exported relation: {} x {}", rel.nrow(), rel.ncol());

    Ok(())
}
