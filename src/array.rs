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

//! Fixed-capacity positional array.
//!
//! [`BoundedArray`] owns exactly `capacity` slots, each either empty or
//! holding a value. Its logical length is the number of occupied slots,
//! counted fresh on every call.
//!
//! Inserts keep occupied slots packed at the front by shifting the physical
//! slots `[index, length)` one position to the right. [`BoundedArray::delete`]
//! does not compact: it empties the slot in place, which can leave a hole
//! inside the prefix. Later inserts still shift physical slots up to the
//! current logical length, so a hole inside the prefix means the slot at
//! position `length` is overwritten.
//!
//! # Example
//!
//! ```
//! use ledger_slots::BoundedArray;
//!
//! let mut array = BoundedArray::from_values(5, vec![1]).unwrap();
//! array.insert_first(3).unwrap();
//! array.insert_after_index(1, 4).unwrap();
//!
//! assert_eq!(array.logical_length(), 3);
//! assert_eq!(array.get(2), Some(&4));
//! assert_eq!(array.to_string(), "BoundedArray(capacity=5, items=[3, 1, 4, None, None])");
//! ```

use crate::ArrayError;
use std::fmt;

/// Initial contents of a [`BoundedArray`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fill<T> {
    /// Every slot starts empty.
    Empty,
    /// Every slot holds a copy of the value.
    Value(T),
    /// Values become the occupied prefix; remaining slots are empty.
    Values(Vec<T>),
    /// Slots become the prefix as given, holes included.
    Slots(Vec<Option<T>>),
}

/// Fixed-capacity array of optional slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedArray<T> {
    slots: Vec<Option<T>>,
}

impl<T> BoundedArray<T> {
    /// Creates an array of `capacity` empty slots.
    ///
    /// # Errors
    ///
    /// [`ArrayError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ArrayError> {
        Self::from_slots(capacity, Vec::new())
    }

    /// Creates an array whose prefix is `values`, every other slot empty.
    ///
    /// # Errors
    ///
    /// - [`ArrayError::InvalidCapacity`] - `capacity` is zero.
    /// - [`ArrayError::ListTooLarge`] - More values than slots.
    pub fn from_values(capacity: usize, values: Vec<T>) -> Result<Self, ArrayError> {
        Self::from_slots(capacity, values.into_iter().map(Some).collect())
    }

    /// Creates an array whose prefix is `prefix` exactly as given.
    ///
    /// Empty entries in `prefix` stay empty, so the array may start with
    /// holes.
    pub fn from_slots(capacity: usize, mut prefix: Vec<Option<T>>) -> Result<Self, ArrayError> {
        if capacity == 0 {
            return Err(ArrayError::InvalidCapacity);
        }
        if prefix.len() > capacity {
            return Err(ArrayError::ListTooLarge {
                len: prefix.len(),
                capacity,
            });
        }
        prefix.resize_with(capacity, || None);
        Ok(Self { slots: prefix })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn logical_length(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.logical_length() >= self.capacity()
    }

    /// All slots in physical order.
    pub fn slots(&self) -> &[Option<T>] {
        &self.slots
    }

    /// Value stored at physical position `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)?.as_ref()
    }

    /// Position of the first empty slot.
    pub fn first_vacant(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Inserts `value` at position 0, shifting the occupied prefix right.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Full`] if every slot is occupied.
    pub fn insert_first(&mut self, value: T) -> Result<(), ArrayError> {
        let length = self.ensure_room()?;
        self.shift_in(0, length, value);
        Ok(())
    }

    /// Inserts `value` at `index`, shifting `[index, length)` right.
    ///
    /// `index == length` appends.
    ///
    /// # Errors
    ///
    /// - [`ArrayError::Full`] - Every slot is occupied, whatever the index.
    /// - [`ArrayError::IndexOutOfRange`] - `index` is past the logical length.
    pub fn insert_at_index(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        let length = self.ensure_room()?;
        if index > length {
            return Err(ArrayError::IndexOutOfRange { index, length });
        }
        self.shift_in(index, length, value);
        Ok(())
    }

    /// Inserts `value` right after the element at `index`.
    ///
    /// Unlike [`insert_at_index`](Self::insert_at_index), `index` must point
    /// at an existing position, so `index == length` is rejected.
    ///
    /// # Errors
    ///
    /// - [`ArrayError::Full`] - Every slot is occupied.
    /// - [`ArrayError::IndexOutOfRange`] - `index >= length`.
    pub fn insert_after_index(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        let length = self.ensure_room()?;
        if index >= length {
            return Err(ArrayError::IndexOutOfRange { index, length });
        }
        self.insert_at_index(index + 1, value)
    }

    /// Inserts `value` right before the element at `index`.
    ///
    /// # Errors
    ///
    /// - [`ArrayError::Full`] - Every slot is occupied.
    /// - [`ArrayError::IndexOutOfRange`] - `index > length`.
    pub fn insert_before_index(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        let length = self.ensure_room()?;
        if index > length {
            return Err(ArrayError::IndexOutOfRange { index, length });
        }
        self.insert_at_index(index, value)
    }

    fn ensure_room(&self) -> Result<usize, ArrayError> {
        let length = self.logical_length();
        if length >= self.capacity() {
            return Err(ArrayError::Full {
                capacity: self.capacity(),
            });
        }
        Ok(length)
    }

    /// Moves physical slots `[index, length)` to `[index + 1, length]` and
    /// stores `value` at `index`. Whatever sat at `length` is dropped.
    fn shift_in(&mut self, index: usize, length: usize, value: T) {
        debug_assert!(index <= length && length < self.slots.len());
        self.slots[index..=length].rotate_right(1);
        self.slots[index] = Some(value);
    }
}

impl<T: PartialEq> BoundedArray<T> {
    /// Position of the first occupied slot equal to `value`.
    ///
    /// Scans all slots, including any beyond a hole.
    pub fn search(&self, value: &T) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref() == Some(value))
    }

    /// Empties the first slot equal to `value`.
    ///
    /// Returns whether a slot was emptied. Remaining slots are not shifted.
    pub fn delete(&mut self, value: &T) -> bool {
        match self.search(value) {
            Some(index) => {
                self.slots[index] = None;
                true
            }
            None => false,
        }
    }
}

impl<T: Clone> BoundedArray<T> {
    /// Creates an array with every slot holding a copy of `value`.
    pub fn filled(capacity: usize, value: T) -> Result<Self, ArrayError> {
        if capacity == 0 {
            return Err(ArrayError::InvalidCapacity);
        }
        Ok(Self {
            slots: vec![Some(value); capacity],
        })
    }

    /// Creates an array from any [`Fill`].
    pub fn with_fill(capacity: usize, fill: Fill<T>) -> Result<Self, ArrayError> {
        match fill {
            Fill::Empty => Self::new(capacity),
            Fill::Value(value) => Self::filled(capacity, value),
            Fill::Values(values) => Self::from_values(capacity, values),
            Fill::Slots(prefix) => Self::from_slots(capacity, prefix),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for BoundedArray<T> {
    /// `{}` prints capacity and slots; `{:#}` also prints the logical length.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundedArray(capacity={}, ", self.capacity())?;
        if f.alternate() {
            write!(f, "length={}, ", self.logical_length())?;
        }
        f.write_str("items=[")?;
        for (position, slot) in self.slots.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Some(value) => write!(f, "{value:?}")?,
                None => f.write_str("None")?,
            }
        }
        f.write_str("])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(array: &BoundedArray<i32>) -> Vec<Option<i32>> {
        array.slots().to_vec()
    }

    #[test]
    fn shift_drops_the_slot_at_length() {
        let mut array = BoundedArray::from_slots(3, vec![Some(1), None, Some(3)]).unwrap();
        assert_eq!(array.logical_length(), 2);

        array.insert_first(0).unwrap();

        assert_eq!(items(&array), vec![Some(0), Some(1), None]);
    }

    #[test]
    fn insert_after_hole_shifts_physical_slots() {
        let mut array = BoundedArray::from_values(5, vec![1, 2, 3]).unwrap();
        assert!(array.delete(&1));
        assert_eq!(items(&array), vec![None, Some(2), Some(3), None, None]);

        array.insert_at_index(1, 9).unwrap();

        assert_eq!(items(&array), vec![None, Some(9), Some(2), None, None]);
    }

    #[test]
    fn full_is_reported_before_index_errors() {
        let mut array = BoundedArray::from_values(2, vec![1, 2]).unwrap();
        assert_eq!(
            array.insert_at_index(10, 0),
            Err(ArrayError::Full { capacity: 2 })
        );
        assert_eq!(
            array.insert_after_index(10, 0),
            Err(ArrayError::Full { capacity: 2 })
        );
    }

    #[test]
    fn display_forms() {
        let array = BoundedArray::from_values(3, vec![1, 2]).unwrap();
        assert_eq!(array.to_string(), "BoundedArray(capacity=3, items=[1, 2, None])");
        assert_eq!(
            format!("{array:#}"),
            "BoundedArray(capacity=3, length=2, items=[1, 2, None])"
        );
    }

    #[test]
    fn display_quotes_strings() {
        let array = BoundedArray::from_values(2, vec!["hello"]).unwrap();
        assert_eq!(array.to_string(), "BoundedArray(capacity=2, items=[\"hello\", None])");
    }
}
