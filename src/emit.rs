use std::io::{self, Write};

use crate::table::{FoldTable, MAX_MAPPING, PAGE_SIZE};

/// Pages covering `[0, MAX_MAPPING)`.
const PAGE_COUNT: usize = MAX_MAPPING as usize / PAGE_SIZE;

/// Values per line in an emitted page array.
const PAGE_ROW: usize = 8;

/// Entries per line in the emitted page-pointer table.
const POINTER_ROW: usize = 4;

/// Writes `table` as a Rust source artifact: one dense `u16` array per
/// non-trivial page, a page-pointer table with one entry per page, and the
/// two-step `lookup` function over them.
///
/// A page in which every codepoint maps to itself is never materialized;
/// its pointer slot is `None` and lookup falls through to identity.
///
/// # Errors
///
/// Only write failures from `out`.
pub fn write_tables(table: &FoldTable, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "// Generated by build.rs from nfkc_cf.txt and nfkc.txt; do not edit."
    )?;

    let mut pointers = Vec::with_capacity(PAGE_COUNT);
    for index in 0..PAGE_COUNT {
        let base = index * PAGE_SIZE;
        let page = table.page(index);

        if page
            .iter()
            .enumerate()
            .all(|(k, &folded)| usize::from(folded) == base + k)
        {
            pointers.push(String::from("None"));
            continue;
        }
        pointers.push(format!("Some(PAGE_{base:04X})"));

        writeln!(out)?;
        writeln!(out, "pub const PAGE_{base:04X}: &[u16; {PAGE_SIZE}] = &[")?;
        for row in page.chunks(PAGE_ROW) {
            let values: Vec<String> = row.iter().map(|v| format!("0x{v:04X}")).collect();
            writeln!(out, "    {},", values.join(", "))?;
        }
        writeln!(out, "];")?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "pub const PAGES: [Option<&[u16; {PAGE_SIZE}]>; {PAGE_COUNT}] = ["
    )?;
    for row in pointers.chunks(POINTER_ROW) {
        writeln!(out, "    {},", row.join(", "))?;
    }
    writeln!(out, "];")?;

    let shift = PAGE_SIZE.trailing_zeros();
    let mask = PAGE_SIZE - 1;
    writeln!(out)?;
    writeln!(
        out,
        "/// Search fold for `c`: identity for everything the table leaves"
    )?;
    writeln!(
        out,
        "/// alone, including all codepoints at or past 0x{MAX_MAPPING:X}."
    )?;
    writeln!(out, "pub const fn lookup(c: u32) -> u32 {{")?;
    writeln!(out, "    if c >= 0x{MAX_MAPPING:X} {{")?;
    writeln!(out, "        return c;")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    match PAGES[(c >> {shift}) as usize] {{")?;
    writeln!(
        out,
        "        Some(page) => page[(c & 0x{mask:X}) as usize] as u32,"
    )?;
    writeln!(out, "        None => c,")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;

    Ok(())
}
