use ledger_data::{Category, Transaction};

pub trait PrintFormatted {
    fn print_formatted(&self);
}

fn category_title(category: &Option<Category>) -> &str {
    match category {
        Some(category) => category.title.as_str(),
        None => "-",
    }
}

impl PrintFormatted for (Transaction, Option<Category>) {
    fn print_formatted(&self) {
        let (tx, category) = self;
        println!("ID:\t\t{}", tx.id);
        println!("Title:\t\t{}", tx.title);
        println!("Value:\t\t{}", tx.value);
        println!("Type:\t\t{}", tx.kind);
        println!("Category:\t{}", category_title(category));
        println!("Created:\t{}", tx.created_at.format("%Y-%m-%d %H:%M:%S"));
    }
}

impl PrintFormatted for Vec<(Transaction, Option<Category>)> {
    fn print_formatted(&self) {
        println!(
            "{:<36}\t{:<30}\t{:>12}\t{:<8}\t{}",
            "ID", "Title", "Value", "Type", "Category"
        );
        println!("{:-<120}", "-");
        for (tx, category) in self {
            println!(
                "{:<36}\t{:<30}\t{:>12}\t{:<8}\t{}",
                tx.id,
                tx.title,
                tx.value,
                tx.kind,
                category_title(category)
            );
        }
    }
}

impl PrintFormatted for Vec<Category> {
    fn print_formatted(&self) {
        println!("{:<36}\t{:<30}\t{}", "ID", "Title", "Created");
        println!("{:-<100}", "-");
        for category in self {
            println!(
                "{:<36}\t{:<30}\t{}",
                category.id,
                category.title,
                category.created_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }
}
