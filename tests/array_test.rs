// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! BoundedArray public API integration tests.

use ledger_slots::{ArrayError, BoundedArray, Fill};

fn sample() -> BoundedArray<i32> {
    BoundedArray::from_values(5, vec![1, 2, 3]).unwrap()
}

// === Construction ===

#[test]
fn new_array_is_empty() {
    let array: BoundedArray<i32> = BoundedArray::new(5).unwrap();
    assert_eq!(array.capacity(), 5);
    assert_eq!(array.logical_length(), 0);
    assert!(array.is_empty());
    assert!(array.slots().iter().all(Option::is_none));
}

#[test]
fn single_value_fills_every_slot() {
    let array = BoundedArray::filled(3, 0).unwrap();
    assert_eq!(array.slots(), &[Some(0), Some(0), Some(0)]);
    assert_eq!(array.logical_length(), 3);
    assert!(array.is_full());
}

#[test]
fn values_become_the_prefix() {
    let array = BoundedArray::from_values(4, vec![1, 2]).unwrap();
    assert_eq!(array.slots(), &[Some(1), Some(2), None, None]);
    assert_eq!(array.logical_length(), 2);
}

#[test]
fn values_may_fill_the_whole_array() {
    let array = BoundedArray::from_values(3, vec![1, 2, 3]).unwrap();
    assert_eq!(array.logical_length(), 3);
    assert!(array.is_full());
}

#[test]
fn slots_prefix_keeps_holes() {
    let array = BoundedArray::from_slots(5, vec![Some(1), Some(2), None, Some(3)]).unwrap();
    assert_eq!(array.logical_length(), 3);
    assert_eq!(array.first_vacant(), Some(2));
}

#[test]
fn zero_capacity_is_rejected() {
    assert_eq!(
        BoundedArray::<i32>::new(0).unwrap_err(),
        ArrayError::InvalidCapacity
    );
    assert_eq!(
        BoundedArray::filled(0, 7).unwrap_err(),
        ArrayError::InvalidCapacity
    );
    assert_eq!(
        BoundedArray::from_values(0, vec![1]).unwrap_err(),
        ArrayError::InvalidCapacity
    );
}

#[test]
fn oversized_values_are_rejected() {
    assert_eq!(
        BoundedArray::from_values(3, vec![1, 2, 3, 4, 5]).unwrap_err(),
        ArrayError::ListTooLarge { len: 5, capacity: 3 }
    );
}

#[test]
fn with_fill_dispatches_every_variant() {
    let empty = BoundedArray::<u8>::with_fill(2, Fill::Empty).unwrap();
    assert_eq!(empty.logical_length(), 0);

    let value = BoundedArray::with_fill(2, Fill::Value('x')).unwrap();
    assert_eq!(value.slots(), &[Some('x'), Some('x')]);

    let values = BoundedArray::with_fill(3, Fill::Values(vec![7])).unwrap();
    assert_eq!(values.slots(), &[Some(7), None, None]);

    let slots = BoundedArray::with_fill(3, Fill::Slots(vec![None, Some(7)])).unwrap();
    assert_eq!(slots.slots(), &[None, Some(7), None]);

    assert_eq!(
        BoundedArray::with_fill(1, Fill::Values(vec![1, 2])).unwrap_err(),
        ArrayError::ListTooLarge { len: 2, capacity: 1 }
    );
}

// === Insertion ===

#[test]
fn insert_first_shifts_right() {
    let mut array = sample();
    array.insert_first(0).unwrap();
    assert_eq!(array.slots(), &[Some(0), Some(1), Some(2), Some(3), None]);
}

#[test]
fn insert_first_into_empty_array() {
    let mut array = BoundedArray::new(3).unwrap();
    array.insert_first(1).unwrap();
    assert_eq!(array.slots(), &[Some(1), None, None]);
}

#[test]
fn insert_at_index_middle() {
    let mut array = sample();
    array.insert_at_index(1, 9).unwrap();
    assert_eq!(array.slots(), &[Some(1), Some(9), Some(2), Some(3), None]);
}

#[test]
fn insert_at_index_beginning() {
    let mut array = sample();
    array.insert_at_index(0, 9).unwrap();
    assert_eq!(array.slots(), &[Some(9), Some(1), Some(2), Some(3), None]);
}

#[test]
fn insert_at_length_appends() {
    let mut array = sample();
    array.insert_at_index(3, 4).unwrap();
    assert_eq!(array.slots(), &[Some(1), Some(2), Some(3), Some(4), None]);
}

#[test]
fn insert_at_index_past_length_is_out_of_range() {
    let mut array = sample();
    assert_eq!(
        array.insert_at_index(4, 9),
        Err(ArrayError::IndexOutOfRange { index: 4, length: 3 })
    );
    assert_eq!(array, sample());
}

#[test]
fn insert_after_index_places_value_next() {
    let mut array = sample();
    array.insert_after_index(0, 15).unwrap();
    assert_eq!(array.slots(), &[Some(1), Some(15), Some(2), Some(3), None]);
}

#[test]
fn insert_after_last_element_appends() {
    let mut array = sample();
    array.insert_after_index(2, 4).unwrap();
    assert_eq!(array.get(3), Some(&4));
}

#[test]
fn insert_after_index_requires_existing_position() {
    let mut array = sample();
    assert_eq!(
        array.insert_after_index(3, 9),
        Err(ArrayError::IndexOutOfRange { index: 3, length: 3 })
    );
    assert_eq!(array, sample());
}

#[test]
fn insert_before_index_places_value_before() {
    let mut array = sample();
    array.insert_before_index(1, 15).unwrap();
    assert_eq!(array.slots(), &[Some(1), Some(15), Some(2), Some(3), None]);
}

#[test]
fn insert_before_length_appends() {
    let mut array = sample();
    array.insert_before_index(3, 4).unwrap();
    assert_eq!(array.slots(), &[Some(1), Some(2), Some(3), Some(4), None]);
    assert_eq!(
        array.insert_before_index(5, 9),
        Err(ArrayError::IndexOutOfRange { index: 5, length: 4 })
    );
}

#[test]
fn every_insert_reports_full_regardless_of_index() {
    let mut array = BoundedArray::from_values(3, vec![1, 2, 3]).unwrap();
    let full = Err(ArrayError::Full { capacity: 3 });

    assert_eq!(array.insert_first(0), full);
    assert_eq!(array.insert_at_index(0, 0), full);
    assert_eq!(array.insert_at_index(99, 0), full);
    assert_eq!(array.insert_after_index(1, 0), full);
    assert_eq!(array.insert_before_index(99, 0), full);
    assert_eq!(array.slots(), &[Some(1), Some(2), Some(3)]);
}

#[test]
fn demo_sequence() {
    let mut array = BoundedArray::from_values(5, vec![1]).unwrap();
    assert_eq!(array.logical_length(), 1);

    array.insert_first(3).unwrap();
    assert_eq!(array.slots(), &[Some(3), Some(1), None, None, None]);

    array.insert_after_index(1, 4).unwrap();
    assert_eq!(array.logical_length(), 3);
    assert_eq!(array.get(2), Some(&4));

    array.insert_before_index(3, 5).unwrap();
    assert_eq!(array.slots(), &[Some(3), Some(1), Some(4), Some(5), None]);

    assert!(array.delete(&5));
    assert_eq!(array.search(&4), Some(2));
}

// === Deletion ===

#[test]
fn delete_empties_first_match_without_shifting() {
    let mut array = BoundedArray::from_values(5, vec![1, 2, 3, 2]).unwrap();
    assert!(array.delete(&2));
    assert_eq!(array.slots(), &[Some(1), None, Some(3), Some(2), None]);
    assert_eq!(array.logical_length(), 3);
}

#[test]
fn delete_missing_value_changes_nothing() {
    let mut array = BoundedArray::from_values(5, vec![1, 2, 3, 2]).unwrap();
    assert!(!array.delete(&99));
    assert_eq!(array.slots(), &[Some(1), Some(2), Some(3), Some(2), None]);
    assert_eq!(array.logical_length(), 4);
}

#[test]
fn delete_then_search_finds_nothing() {
    let mut array = BoundedArray::from_values(3, vec![1, 2, 3]).unwrap();
    for value in [1, 2, 3] {
        assert!(array.delete(&value));
        assert_eq!(array.search(&value), None);
    }
    assert!(array.is_empty());
}

#[test]
fn single_slot_array() {
    let mut array = BoundedArray::from_values(1, vec![42]).unwrap();
    assert_eq!(array.insert_first(0), Err(ArrayError::Full { capacity: 1 }));
    assert_eq!(array.search(&42), Some(0));
    assert!(array.delete(&42));
    assert_eq!(array.logical_length(), 0);
}

// === Search ===

#[test]
fn search_returns_lowest_index() {
    let array = BoundedArray::from_values(5, vec![1, 2, 3, 2]).unwrap();
    assert_eq!(array.search(&2), Some(1));
    assert_eq!(array.search(&99), None);
}

#[test]
fn search_scans_past_holes() {
    let array = BoundedArray::from_slots(4, vec![None, None, Some(7)]).unwrap();
    assert_eq!(array.search(&7), Some(2));
    assert_eq!(array.first_vacant(), Some(0));
}

#[test]
fn first_vacant_is_none_when_full() {
    let array = BoundedArray::filled(2, "x").unwrap();
    assert_eq!(array.first_vacant(), None);
}

#[test]
fn works_with_owned_strings() {
    let mut array = BoundedArray::from_values(4, vec!["hello".to_string()]).unwrap();
    array.insert_first("first".to_string()).unwrap();
    assert_eq!(array.search(&"hello".to_string()), Some(1));
    assert_eq!(
        format!("{array:#}"),
        "BoundedArray(capacity=4, length=2, items=[\"first\", \"hello\", None, None])"
    );
}
