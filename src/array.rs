// Dynamic, index-addressable array of entries, some of which may be unset
// (spec §4.2). Grounded on `original_source/libpff/libpff_array_type.h`:
// `number_of_allocated_entries` / `number_of_entries` / `entries` become a
// plain `Vec<Option<T>>`, where the allocated/used split is just the vec's
// capacity vs its logical length and an unset slot is `None` rather than a
// null `intptr_t`.

use std::cmp::Ordering;

use crate::error::{Error, Result};

/// Whether `insert_ordered` rejects a value that compares `Equal` to one
/// already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPolicy {
	AllowDuplicates,
	UniqueEntries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
	/// Inserted at this index.
	Inserted(usize),
	/// Rejected: an equal entry already occupies this index.
	AlreadyPresent(usize),
}

/// An index-addressable array where entries may be vacant. Addresses handed
/// out (`append_entry`'s returned index) remain valid across later appends
/// and resizes, matching `libpff_array_append_entry`'s contract.
#[derive(Debug, Clone)]
pub struct DynamicArray<T> {
	entries: Vec<Option<T>>,
}

impl<T> Default for DynamicArray<T> {
	fn default() -> Self {
		DynamicArray { entries: Vec::new() }
	}
}

impl<T> DynamicArray<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of logical slots, set or not.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of slots actually holding a value.
	pub fn number_of_entries(&self) -> usize {
		self.entries.iter().filter(|e| e.is_some()).count()
	}

	/// Grows or shrinks the array to exactly `new_len` slots. Growing fills
	/// the new slots as unset; shrinking drops the entries beyond `new_len`.
	pub fn resize(&mut self, new_len: usize) -> Result<()> {
		if new_len > self.entries.len() {
			self.entries
				.try_reserve(new_len - self.entries.len())
				.map_err(|e| Error::OutOfMemory(e.to_string()))?;
			self.entries.resize_with(new_len, || None);
		} else {
			self.entries.truncate(new_len);
		}
		Ok(())
	}

	/// Clears every slot to unset without changing the length.
	pub fn clear(&mut self) {
		for entry in self.entries.iter_mut() {
			*entry = None;
		}
	}

	/// Drops all slots, returning the array to empty.
	pub fn empty(&mut self) {
		self.entries.clear();
	}

	pub fn get_entry_by_index(&self, index: usize) -> Result<Option<&T>> {
		self.entries
			.get(index)
			.map(|slot| slot.as_ref())
			.ok_or_else(|| Error::OutOfBounds(format!("DynamicArray::get_entry_by_index: {} out of bounds for length {}", index, self.entries.len())))
	}

	pub fn set_entry_by_index(&mut self, index: usize, value: Option<T>) -> Result<()> {
		let slot = self
			.entries
			.get_mut(index)
			.ok_or_else(|| Error::OutOfBounds(format!("DynamicArray::set_entry_by_index: {} out of bounds for length {}", index, self.entries.len())))?;
		*slot = value;
		Ok(())
	}

	/// Appends `value` past the current length, growing the array by one.
	/// O(amortised 1), matching `libpff_array_append_entry`: it never scans
	/// for a gap to fill, so a cleared slot stays unset until `set_entry_by_index`
	/// addresses it directly. Returns the index it was placed at.
	pub fn append_entry(&mut self, value: T) -> Result<usize> {
		self.entries.try_reserve(1).map_err(|e| Error::OutOfMemory(e.to_string()))?;
		self.entries.push(Some(value));
		Ok(self.entries.len() - 1)
	}

	/// Ordered insert by `compare`, walking from index 0 and inserting
	/// before the first set entry greater than `value`. Under
	/// `UniqueEntries`, a set entry that compares `Equal` rejects the
	/// insert. Unset slots are skipped, not compared against.
	pub fn insert_ordered<F>(&mut self, value: T, compare: F, policy: InsertPolicy) -> Result<InsertOutcome>
	where
		F: Fn(&T, &T) -> Ordering,
	{
		let mut target = self.entries.len();
		for (index, slot) in self.entries.iter().enumerate() {
			if let Some(existing) = slot {
				match compare(existing, &value) {
					Ordering::Greater => {
						target = index;
						break;
					}
					Ordering::Equal if policy == InsertPolicy::UniqueEntries => {
						return Ok(InsertOutcome::AlreadyPresent(index));
					}
					_ => {}
				}
			}
		}
		self.entries.try_reserve(1).map_err(|e| Error::OutOfMemory(e.to_string()))?;
		self.entries.insert(target, Some(value));
		Ok(InsertOutcome::Inserted(target))
	}

	pub fn iter(&self) -> impl Iterator<Item = &T> {
		self.entries.iter().filter_map(|e| e.as_ref())
	}
}

impl<T: Clone> DynamicArray<T> {
	pub fn try_clone(&self) -> Result<Self> {
		let mut entries = Vec::new();
		entries.try_reserve(self.entries.len()).map_err(|e| Error::OutOfMemory(e.to_string()))?;
		entries.extend(self.entries.iter().cloned());
		Ok(DynamicArray { entries })
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn resize_grows_and_shrinks() {
		let mut array: DynamicArray<i32> = DynamicArray::new();
		array.resize(3).unwrap();
		assert_eq!(array.len(), 3);
		assert_eq!(array.get_entry_by_index(0).unwrap(), None);
		array.set_entry_by_index(1, Some(7)).unwrap();
		array.resize(1).unwrap();
		assert_eq!(array.len(), 1);
		assert_eq!(array.get_entry_by_index(0).unwrap(), None);
	}

	#[test]
	fn append_always_grows_past_current_length() {
		let mut array = DynamicArray::new();
		array.resize(2).unwrap();
		array.set_entry_by_index(1, Some(10)).unwrap();
		// Index 0 is unset, but append_entry never scans for it: it always
		// lands past the current length.
		let index = array.append_entry(20).unwrap();
		assert_eq!(index, 2);
		assert_eq!(array.len(), 3);
		assert_eq!(array.get_entry_by_index(0).unwrap(), None);
	}

	#[test]
	fn clear_preserves_length_empty_drops_it() {
		let mut array = DynamicArray::new();
		array.append_entry(1).unwrap();
		array.append_entry(2).unwrap();
		array.clear();
		assert_eq!(array.len(), 2);
		assert_eq!(array.number_of_entries(), 0);
		array.empty();
		assert_eq!(array.len(), 0);
	}

	#[test]
	fn ordered_insert_skips_unset_slots() {
		let mut array = DynamicArray::new();
		array.resize(2).unwrap();
		array.set_entry_by_index(0, Some(5)).unwrap();
		let outcome = array.insert_ordered(3, |a, b| a.cmp(b), InsertPolicy::AllowDuplicates).unwrap();
		assert_eq!(outcome, InsertOutcome::Inserted(0));
		assert_eq!(array.iter().copied().collect::<Vec<_>>(), vec![3, 5]);
	}

	#[test]
	fn ordered_insert_unique_rejects_duplicate() {
		let mut array = DynamicArray::new();
		array.append_entry(1).unwrap();
		array.append_entry(3).unwrap();
		let outcome = array.insert_ordered(1, |a, b| a.cmp(b), InsertPolicy::UniqueEntries).unwrap();
		assert_eq!(outcome, InsertOutcome::AlreadyPresent(0));
	}

	#[test]
	fn clone_preserves_gaps() {
		let mut array = DynamicArray::new();
		array.resize(3).unwrap();
		array.set_entry_by_index(1, Some(9)).unwrap();
		let cloned = array.try_clone().unwrap();
		assert_eq!(cloned.len(), 3);
		assert_eq!(cloned.get_entry_by_index(1).unwrap(), Some(&9));
		assert_eq!(cloned.get_entry_by_index(0).unwrap(), None);
	}
}
