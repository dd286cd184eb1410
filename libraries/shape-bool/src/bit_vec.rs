/// Fixed-size set of small integers, used for visited marks and per-shape face flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitVec {
	data: Vec<u64>,
	len: usize,
}

impl BitVec {
	pub fn new(len: usize) -> Self {
		BitVec { data: vec![0; len.div_ceil(64)], len }
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	#[inline]
	pub fn set(&mut self, index: usize) {
		debug_assert!(index < self.len, "bit {index} out of range for {}", self.len);
		self.data[index / 64] |= 1u64 << (index % 64);
	}

	#[inline]
	pub fn get(&self, index: usize) -> bool {
		index < self.len && self.data[index / 64] & (1u64 << (index % 64)) != 0
	}

	pub fn clear(&mut self) {
		self.data.fill(0);
	}

	pub fn count_ones(&self) -> usize {
		self.data.iter().map(|word| word.count_ones() as usize).sum()
	}

	pub fn any(&self) -> bool {
		self.data.iter().any(|&word| word != 0)
	}

	pub fn all(&self) -> bool {
		self.count_ones() == self.len
	}

	pub fn iter_set_bits(&self) -> BitVecIterator<'_> {
		BitVecIterator {
			bit_vec: self,
			current_word: self.data.first().copied().unwrap_or(0),
			word_index: 0,
		}
	}
}

pub struct BitVecIterator<'a> {
	bit_vec: &'a BitVec,
	current_word: u64,
	word_index: usize,
}

impl Iterator for BitVecIterator<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		while self.current_word == 0 {
			self.word_index += 1;
			self.current_word = *self.bit_vec.data.get(self.word_index)?;
		}
		let tz = self.current_word.trailing_zeros() as usize;
		self.current_word ^= 1 << tz;
		Some(self.word_index * 64 + tz)
	}
}
