use std::ops::Deref;

/// A numeric result handed across the API boundary, tagged with who owns it.
///
/// - `Owned`   : freshly allocated for the caller; dropping it releases it.
/// - `Borrowed`: a view into storage owned by a network or dataset. The
///                lifetime ties it to that owner, so it cannot outlive it or
///                coexist with a mutating call on it.
///
/// Transferring ownership is a move (`into_owned`), never a flag flip.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer<'a, T> {
    Owned(Vec<T>),
    Borrowed(&'a [T]),
}

impl<'a, T> Buffer<'a, T> {
    /// True when the caller is responsible for releasing the storage.
    pub fn is_owned(&self) -> bool {
        matches!(self, Buffer::Owned(_))
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Buffer::Owned(data) => data,
            Buffer::Borrowed(data) => data,
        }
    }
}

impl<'a, T: Clone> Buffer<'a, T> {
    /// Takes ownership of the contents. Owned buffers are moved out as-is;
    /// borrowed ones are copied so the original owner keeps its storage.
    pub fn into_owned(self) -> Vec<T> {
        match self {
            Buffer::Owned(data) => data,
            Buffer::Borrowed(data) => data.to_vec(),
        }
    }
}

impl<'a, T> Deref for Buffer<'a, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> AsRef<[T]> for Buffer<'a, T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> From<Vec<T>> for Buffer<'a, T> {
    fn from(data: Vec<T>) -> Self {
        Buffer::Owned(data)
    }
}

impl<'a, T> From<&'a [T]> for Buffer<'a, T> {
    fn from(data: &'a [T]) -> Self {
        Buffer::Borrowed(data)
    }
}
