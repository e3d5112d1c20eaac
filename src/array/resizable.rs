//! Growable, shrinkable buffer of doubles

use crate::math;
use crate::traits::ArrayError;
use parking_lot::Mutex;
use std::sync::Arc;
use std::vec::Vec;

/// Default storage length of a new array
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
/// Default multiplicative growth factor
pub const DEFAULT_EXPANSION_FACTOR: f64 = 2.0;
/// Default gap between contraction criterion and expansion factor
pub const DEFAULT_CONTRACTION_DELTA: f64 = 0.5;
/// Largest storage length a `Vec<f64>` can hold
pub const MAX_CAPACITY: usize = isize::MAX as usize / core::mem::size_of::<f64>();

/// How storage grows when it runs out
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpansionMode {
    /// New capacity is `ceil(capacity * expansion_factor)`; contract when
    /// `capacity / len` exceeds the contraction criterion
    #[default]
    Multiplicative,
    /// New capacity is `capacity + round(expansion_factor)`; contract when
    /// `capacity - len` exceeds the contraction criterion
    Additive,
}

/// Construction settings for a [`ResizableDoubleArray`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizableConfig {
    pub initial_capacity: usize,
    pub expansion_factor: f64,
    pub contraction_criterion: f64,
    pub expansion_mode: ExpansionMode,
}

impl Default for ResizableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            expansion_factor: DEFAULT_EXPANSION_FACTOR,
            contraction_criterion: DEFAULT_EXPANSION_FACTOR + DEFAULT_CONTRACTION_DELTA,
            expansion_mode: ExpansionMode::Multiplicative,
        }
    }
}

impl ResizableConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_expansion_factor(mut self, expansion_factor: f64) -> Self {
        self.expansion_factor = expansion_factor;
        self
    }

    pub fn with_contraction_criterion(mut self, contraction_criterion: f64) -> Self {
        self.contraction_criterion = contraction_criterion;
        self
    }

    pub fn with_expansion_mode(mut self, expansion_mode: ExpansionMode) -> Self {
        self.expansion_mode = expansion_mode;
        self
    }

    /// Check every constraint a [`ResizableDoubleArray`] relies on
    pub fn validate(&self) -> Result<(), ArrayError> {
        if self.initial_capacity == 0 {
            log_debug!("rejected initial capacity {}", self.initial_capacity);
            return Err(ArrayError::InvalidCapacity(self.initial_capacity));
        }
        check_contract_expand(self.contraction_criterion, self.expansion_factor)
    }
}

/// Both factors above 1, contraction strictly above expansion.
fn check_contract_expand(contraction: f64, expansion: f64) -> Result<(), ArrayError> {
    let result = if expansion.is_nan() || expansion <= 1.0 {
        Err(ArrayError::InvalidExpansionFactor(expansion))
    } else if contraction.is_nan() || contraction <= 1.0 {
        Err(ArrayError::InvalidContractionCriterion(contraction))
    } else if contraction <= expansion {
        Err(ArrayError::ContractionBelowExpansion {
            contraction,
            expansion,
        })
    } else {
        Ok(())
    };
    if let Err(err) = &result {
        log_debug!("rejected resize policy: {}", err);
    }
    result
}

#[derive(Clone, Debug)]
struct Inner {
    /// Backing storage; shared only with in-flight `compute` snapshots
    data: Arc<Vec<f64>>,
    num_elements: usize,
    start_index: usize,
    expansion_factor: f64,
    contraction_criterion: f64,
    expansion_mode: ExpansionMode,
}

impl Inner {
    fn storage_mut(&mut self) -> &mut Vec<f64> {
        Arc::make_mut(&mut self.data)
    }

    fn end(&self) -> usize {
        self.start_index + self.num_elements
    }

    fn window(&self) -> &[f64] {
        &self.data[self.start_index..self.end()]
    }

    /// Next storage length under the expansion policy, capped at [`MAX_CAPACITY`]
    fn grown_capacity(&self) -> usize {
        let capacity = self.data.len() as f64;
        let grown = match self.expansion_mode {
            ExpansionMode::Multiplicative => math::ceil(capacity * self.expansion_factor),
            ExpansionMode::Additive => capacity + math::round(self.expansion_factor),
        };
        if grown >= MAX_CAPACITY as f64 {
            MAX_CAPACITY
        } else {
            grown as usize
        }
    }

    /// Room between the window start and [`MAX_CAPACITY`]
    fn max_len(&self) -> usize {
        MAX_CAPACITY.saturating_sub(self.start_index)
    }

    fn expand(&mut self) {
        let new_size = self.grown_capacity();
        self.expand_to(new_size);
    }

    fn expand_to(&mut self, size: usize) {
        log_trace!("expanding storage from {} to {}", self.data.len(), size);
        self.storage_mut().resize(size, 0.0);
    }

    fn should_contract(&self) -> bool {
        let capacity = self.data.len();
        match self.expansion_mode {
            ExpansionMode::Multiplicative => {
                (capacity as f64 / self.num_elements as f64) > self.contraction_criterion
            }
            ExpansionMode::Additive => {
                (capacity - self.num_elements) as f64 > self.contraction_criterion
            }
        }
    }

    fn contract(&mut self) {
        let mut data = Vec::with_capacity(self.num_elements + 1);
        data.extend_from_slice(self.window());
        data.push(0.0);
        log_trace!("contracting storage from {} to {}", self.data.len(), data.len());
        self.data = Arc::new(data);
        self.start_index = 0;
    }

    fn contract_if_needed(&mut self) {
        if self.should_contract() {
            self.contract();
        }
    }

    fn deep_clone(&self) -> Self {
        Self {
            data: Arc::new(self.data.as_ref().clone()),
            ..self.clone()
        }
    }
}

/// A variable-length array of `f64` with automatic growth and shrinkage
///
/// Elements live in a window `[start_index, start_index + len)` of a larger
/// storage vector. Appends grow the storage by the configured
/// [`ExpansionMode`] when it is full. Front discards and rolling inserts move
/// the window start; once the slack exceeds the contraction criterion the
/// storage is reallocated to `len + 1` and the window moved back to 0.
///
/// All methods take `&self`: a single internal lock makes each call atomic,
/// so the array can be shared between threads. Sequences of calls are not
/// atomic.
///
/// # Example
///
/// ```
/// use storeless::array::ResizableDoubleArray;
///
/// let array = ResizableDoubleArray::from_slice(&[1.0, 2.0, 3.0, 4.0]);
///
/// // fixed-size window: push one in, get the oldest back
/// assert_eq!(array.add_element_rolling(5.0), 1.0);
/// assert_eq!(array.elements(), vec![2.0, 3.0, 4.0, 5.0]);
///
/// array.discard_front_elements(2).unwrap();
/// assert_eq!(array.elements(), vec![4.0, 5.0]);
/// ```
pub struct ResizableDoubleArray {
    inner: Mutex<Inner>,
}

impl Default for ResizableDoubleArray {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizableDoubleArray {
    /// Create an empty array with the default configuration
    pub fn new() -> Self {
        Self::from_valid_config(ResizableConfig::default())
    }

    /// Create an empty array with the given initial storage length
    pub fn with_capacity(initial_capacity: usize) -> Result<Self, ArrayError> {
        Self::with_config(ResizableConfig::default().with_initial_capacity(initial_capacity))
    }

    /// Create an empty array with explicit settings
    pub fn with_config(config: ResizableConfig) -> Result<Self, ArrayError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Create an array holding a copy of `values`
    pub fn from_slice(values: &[f64]) -> Self {
        let array = Self::new();
        if !values.is_empty() {
            array.add_elements(values);
        }
        array
    }

    fn from_valid_config(config: ResizableConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                data: Arc::new(vec![0.0; config.initial_capacity]),
                num_elements: 0,
                start_index: 0,
                expansion_factor: config.expansion_factor,
                contraction_criterion: config.contraction_criterion,
                expansion_mode: config.expansion_mode,
            }),
        }
    }

    /// Append a value, growing storage first if it is full
    pub fn add_element(&self, value: f64) {
        let mut inner = self.inner.lock();
        if inner.data.len() <= inner.end() {
            inner.expand();
        }
        let pos = inner.end();
        inner.storage_mut()[pos] = value;
        inner.num_elements += 1;
    }

    /// Append all values with a single reallocation sized to fit
    pub fn add_elements(&self, values: &[f64]) {
        let mut inner = self.inner.lock();
        let mut data = Vec::with_capacity(inner.num_elements + values.len() + 1);
        data.extend_from_slice(inner.window());
        data.extend_from_slice(values);
        data.push(0.0);
        log_trace!("reallocating storage from {} to {}", inner.data.len(), data.len());

        inner.data = Arc::new(data);
        inner.start_index = 0;
        inner.num_elements += values.len();
    }

    /// Append a value and drop the oldest one, keeping the length fixed
    ///
    /// Returns the dropped value. On an empty array the window has no room,
    /// so `value` itself falls straight out and is returned.
    pub fn add_element_rolling(&self, value: f64) -> f64 {
        let mut inner = self.inner.lock();
        if inner.num_elements == 0 {
            return value;
        }

        let discarded = inner.data[inner.start_index];
        if inner.end() + 1 > inner.data.len() {
            inner.expand();
        }
        inner.start_index += 1;
        let pos = inner.end() - 1;
        inner.storage_mut()[pos] = value;

        inner.contract_if_needed();
        discarded
    }

    /// Replace the last element, returning the previous value
    pub fn substitute_most_recent_element(&self, value: f64) -> Result<f64, ArrayError> {
        let mut inner = self.inner.lock();
        if inner.num_elements < 1 {
            return Err(ArrayError::Empty);
        }
        let pos = inner.end() - 1;
        let previous = inner.data[pos];
        inner.storage_mut()[pos] = value;
        Ok(previous)
    }

    /// Write `value` at `index`, extending the array if needed
    ///
    /// Slots between the old end and `index` read as whatever the storage
    /// held, which is 0.0 for storage that was never written. Fails if the
    /// slot lies past [`MAX_CAPACITY`].
    pub fn set_element(&self, index: usize, value: f64) -> Result<(), ArrayError> {
        let mut inner = self.inner.lock();
        if index >= inner.max_len() {
            log_debug!("rejected set at index {} past storage limit", index);
            return Err(ArrayError::IndexOutOfBounds {
                index,
                len: inner.num_elements,
            });
        }
        if index + 1 > inner.num_elements {
            inner.num_elements = index + 1;
        }
        let pos = inner.start_index + index;
        if pos >= inner.data.len() {
            inner.expand_to(pos + 1);
        }
        inner.storage_mut()[pos] = value;
        Ok(())
    }

    /// Value at `index` in the logical window
    pub fn element(&self, index: usize) -> Result<f64, ArrayError> {
        let inner = self.inner.lock();
        if index >= inner.num_elements {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                len: inner.num_elements,
            });
        }
        Ok(inner.data[inner.start_index + index])
    }

    /// Drop the `count` oldest elements
    pub fn discard_front_elements(&self, count: usize) -> Result<(), ArrayError> {
        self.discard_extreme_elements(count, true)
    }

    /// Drop the `count` newest elements
    pub fn discard_most_recent_elements(&self, count: usize) -> Result<(), ArrayError> {
        self.discard_extreme_elements(count, false)
    }

    fn discard_extreme_elements(&self, count: usize, front: bool) -> Result<(), ArrayError> {
        let mut inner = self.inner.lock();
        if count > inner.num_elements {
            return Err(ArrayError::DiscardTooMany {
                requested: count,
                available: inner.num_elements,
            });
        }
        inner.num_elements -= count;
        if front {
            inner.start_index += count;
        }
        inner.contract_if_needed();
        Ok(())
    }

    /// Copy of the logical contents
    pub fn elements(&self) -> Vec<f64> {
        self.inner.lock().window().to_vec()
    }

    /// Run `f(storage, start, len)` on a consistent snapshot
    ///
    /// The lock is held only while the snapshot is taken; `f` runs unlocked
    /// and sees the contents as of the call even if other threads mutate the
    /// array meanwhile.
    ///
    /// ```
    /// use storeless::array::ResizableDoubleArray;
    ///
    /// let array = ResizableDoubleArray::from_slice(&[1.0, 2.0, 3.0]);
    /// let total = array.compute(|values, start, len| values[start..start + len].iter().sum::<f64>());
    /// assert_eq!(total, 6.0);
    /// ```
    pub fn compute<R>(&self, f: impl FnOnce(&[f64], usize, usize) -> R) -> R {
        let (data, start, len) = {
            let inner = self.inner.lock();
            (Arc::clone(&inner.data), inner.start_index, inner.num_elements)
        };
        f(&data, start, len)
    }

    /// Forget all elements, keeping the storage
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.num_elements = 0;
        inner.start_index = 0;
    }

    /// Shrink storage to `len + 1` and move the window to the start
    pub fn contract(&self) {
        self.inner.lock().contract();
    }

    /// Set the logical length, growing storage if needed
    ///
    /// Growing exposes whatever the storage holds past the old end. Fails if
    /// the window would end past [`MAX_CAPACITY`].
    pub fn set_num_elements(&self, len: usize) -> Result<(), ArrayError> {
        let mut inner = self.inner.lock();
        if len > inner.max_len() {
            log_debug!("rejected length {} past storage limit", len);
            return Err(ArrayError::LengthTooLarge(len));
        }
        let new_size = inner.start_index + len;
        if new_size > inner.data.len() {
            inner.expand_to(new_size);
        }
        inner.num_elements = len;
        Ok(())
    }

    /// Number of elements in the logical window
    pub fn len(&self) -> usize {
        self.inner.lock().num_elements
    }

    /// Check if the logical window is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the backing storage
    pub fn capacity(&self) -> usize {
        self.inner.lock().data.len()
    }

    /// Offset of the first element inside the storage
    pub fn start_index(&self) -> usize {
        self.inner.lock().start_index
    }

    pub fn expansion_factor(&self) -> f64 {
        self.inner.lock().expansion_factor
    }

    pub fn contraction_criterion(&self) -> f64 {
        self.inner.lock().contraction_criterion
    }

    pub fn expansion_mode(&self) -> ExpansionMode {
        self.inner.lock().expansion_mode
    }

    /// Change the growth factor, keeping it below the contraction criterion
    pub fn set_expansion_factor(&self, expansion_factor: f64) -> Result<(), ArrayError> {
        let mut inner = self.inner.lock();
        check_contract_expand(inner.contraction_criterion, expansion_factor)?;
        inner.expansion_factor = expansion_factor;
        Ok(())
    }

    /// Change the contraction criterion, keeping it above the growth factor
    pub fn set_contraction_criterion(&self, contraction_criterion: f64) -> Result<(), ArrayError> {
        let mut inner = self.inner.lock();
        check_contract_expand(contraction_criterion, inner.expansion_factor)?;
        inner.contraction_criterion = contraction_criterion;
        Ok(())
    }

    pub fn set_expansion_mode(&self, expansion_mode: ExpansionMode) {
        self.inner.lock().expansion_mode = expansion_mode;
    }

    /// Replace this array's configuration and contents with a deep copy of `source`
    pub fn copy_from(&self, source: &Self) {
        if core::ptr::eq(self, source) {
            return;
        }
        let copy = source.inner.lock().deep_clone();
        *self.inner.lock() = copy;
    }
}

impl Clone for ResizableDoubleArray {
    fn clone(&self) -> Self {
        Self {
            inner: Mutex::new(self.inner.lock().deep_clone()),
        }
    }
}

impl core::fmt::Debug for ResizableDoubleArray {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ResizableDoubleArray")
            .field("elements", &inner.window())
            .field("capacity", &inner.data.len())
            .field("start_index", &inner.start_index)
            .field("expansion_mode", &inner.expansion_mode)
            .field("expansion_factor", &inner.expansion_factor)
            .field("contraction_criterion", &inner.contraction_criterion)
            .finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ResizableDoubleArray {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let inner = self.inner.lock();
        let mut state = serializer.serialize_struct("ResizableDoubleArray", 6)?;
        state.serialize_field("data", inner.data.as_ref())?;
        state.serialize_field("num_elements", &inner.num_elements)?;
        state.serialize_field("start_index", &inner.start_index)?;
        state.serialize_field("expansion_mode", &inner.expansion_mode)?;
        state.serialize_field("expansion_factor", &inner.expansion_factor)?;
        state.serialize_field("contraction_criterion", &inner.contraction_criterion)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ResizableDoubleArray {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(serde::Deserialize)]
        struct ArrayData {
            data: Vec<f64>,
            num_elements: usize,
            start_index: usize,
            expansion_mode: ExpansionMode,
            expansion_factor: f64,
            contraction_criterion: f64,
        }

        let data = ArrayData::deserialize(deserializer)?;
        check_contract_expand(data.contraction_criterion, data.expansion_factor)
            .map_err(D::Error::custom)?;
        let in_bounds = data
            .start_index
            .checked_add(data.num_elements)
            .is_some_and(|end| end <= data.data.len());
        if data.data.is_empty() || !in_bounds {
            return Err(D::Error::custom("element window outside storage"));
        }

        Ok(ResizableDoubleArray {
            inner: Mutex::new(Inner {
                data: Arc::new(data.data),
                num_elements: data.num_elements,
                start_index: data.start_index,
                expansion_factor: data.expansion_factor,
                contraction_criterion: data.contraction_criterion,
                expansion_mode: data.expansion_mode,
            }),
        })
    }
}
