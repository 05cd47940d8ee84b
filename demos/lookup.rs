use rustyline::DefaultEditor;

use norma::*;

fn main() {
    let mut rl = DefaultEditor::new().expect("Failed to init editor");
    while let Ok(ref line) = rl.readline(">> ") {
        let mut chars = line.chars();
        if let Some(c) = chars.next() {
            if chars.next().is_none() {
                println!("fold_char({c:?}) == {:?}", fold_char(c));
                println!(
                    "fold_u32(U+{:04X}) == U+{:04X}",
                    c as u32,
                    fold_u32(c as u32)
                );
            }
        }
        println!("fold_str({line:?}) == {:?}", fold_str(line));
        rl.add_history_entry(line).expect("Failed to save history");
    }
}
