//! Static Capability Dispatch
//!
//! Each call below is resolved at build time: the input type names its
//! branch, and only that branch's strategy is compiled for it.
//!
//! Run with `cargo run --example dispatch`.

use std::collections::LinkedList;

use tola_variant::classify::numeric::{Numeric, is_power_of_two};
use tola_variant::classify::select::{BUFFER_LEN, WIDE_INT, make_buffer};
use tola_variant::classify::traversal::{Cursor, IterCursor, Jump, SliceCursor, Traversal, advance};
use tola_variant::{branch_name, implements};

fn main() {
    // =========================================================================
    // Traversal: jump on slices, step on linked lists
    // =========================================================================

    let data: Vec<i32> = (1..=10).collect();
    let list: LinkedList<i32> = data.iter().copied().collect();

    let mut slice_cursor = SliceCursor::new(&data);
    let tag = advance(&mut slice_cursor, 3);
    println!(
        "{:<14} advance(3) -> {:?} via {tag:?}",
        branch_name::<Traversal, SliceCursor<'_, i32>>(),
        slice_cursor.current(),
    );

    let mut list_cursor = IterCursor::new(list.iter());
    let tag = advance(&mut list_cursor, 3);
    println!(
        "{:<14} advance(3) -> {:?} via {tag:?}",
        branch_name::<Traversal, IterCursor<std::collections::linked_list::Iter<'_, i32>>>(),
        list_cursor.current(),
    );

    println!(
        "slice cursor can jump: {}, list cursor can jump: {}",
        implements!(SliceCursor<'static, i32>: Jump),
        implements!(IterCursor<std::collections::linked_list::Iter<'static, i32>>: Jump),
    );

    // =========================================================================
    // Numeric: bit test for integers, frexp for floats
    // =========================================================================

    println!(
        "{}: 64 -> {}, 48 -> {}",
        branch_name::<Numeric, u32>(),
        is_power_of_two(64u32),
        is_power_of_two(48u32),
    );
    println!(
        "{}: 0.125 -> {}, 0.3 -> {}",
        branch_name::<Numeric, f64>(),
        is_power_of_two(0.125f64),
        is_power_of_two(0.3f64),
    );

    // =========================================================================
    // Const-condition selection
    // =========================================================================

    let buffer = make_buffer();
    println!(
        "wide C int: {WIDE_INT}, buffer {} holds {} of {BUFFER_LEN} zeros",
        std::any::type_name_of_val(&buffer),
        buffer.iter().filter(|&&x| x == 0).count(),
    );
}
