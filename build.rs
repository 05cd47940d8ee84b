#![allow(dead_code)]

use std::{
    env,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
};

#[path = "src/rule.rs"]
mod rule;

#[path = "src/table.rs"]
mod table;

#[path = "src/emit.rs"]
mod emit;

use table::FoldTable;

fn main() {
    println!("cargo:rerun-if-changed=nfkc_cf.txt");
    println!("cargo:rerun-if-changed=nfkc.txt");

    let folding = BufReader::new(File::open("nfkc_cf.txt").expect("failed to open nfkc_cf.txt"));
    let decompositions = BufReader::new(File::open("nfkc.txt").expect("failed to open nfkc.txt"));

    let table = FoldTable::build(folding, decompositions).expect("failed to compile fold table");

    let out_dir = env::var("OUT_DIR").expect("failed to get target directory");
    let out_path = PathBuf::from(out_dir).join("fold_tables.rs");
    let mut out = BufWriter::new(File::create(out_path).expect("failed to create fold_tables.rs"));

    emit::write_tables(&table, &mut out).expect("failed to write fold_tables.rs");
    out.flush().expect("failed to flush fold_tables.rs");
}
