use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use clap::Parser;
use robin_hash::HashTable;
use robin_hash::hash_table::Entry;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Erase every other value after filling and report again.
    #[arg(short = 'e', long = "erase_half")]
    erase_half: bool,
}

fn hash_u64(value: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn report(table: &HashTable<u64>) {
    println!(
        "{} values in {} slots ({:.2}% load)",
        table.len(),
        table.slot_count(),
        table.load_factor() * 100.0
    );
    table.probe_histogram().print();
    table.debug_stats().print();
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating HashTable with target capacity: {}",
        args.target_capacity
    );

    let mut table: HashTable<u64> = HashTable::with_capacity(args.target_capacity);
    let slots = table.slot_count();

    println!("Actual capacity: {} ({} slots)", table.capacity(), slots);
    println!("Filling table with u64 values...");

    let num_values = table.capacity() as u64;
    for value in 0..num_values {
        match table.entry(hash_u64(value), |&v| v == value) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(_) => {
                panic!("Value already exists in table: {}", value);
            }
        }
    }

    assert_eq!(table.slot_count(), slots, "filling to capacity resized the ring");
    report(&table);

    if args.erase_half {
        println!();
        println!("Erasing every other value...");
        for value in (0..num_values).step_by(2) {
            table.remove(hash_u64(value), |&v| v == value);
        }
        report(&table);
    }
}
