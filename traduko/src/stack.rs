//! A `Vec` that is iterated from the last to the first pushed element.

/// A `Vec` that is iterated from the last to the first pushed element.
///
/// The innermost binder of a sentence is the top of the stack,
/// so searching a name from the top finds the binder that shadows all others.
#[derive(Clone, Debug)]
pub struct Stack<A>(Vec<A>);

impl<A> Stack<A> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Default::default()
    }

    /// Return the number of elements on the stack.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the stack contains no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add an element to the top of the stack.
    pub fn push(&mut self, x: A) {
        self.0.push(x)
    }

    /// Push an element on the stack, run a function on it, then pop the element.
    ///
    /// The element is popped also if the function fails,
    /// so the stack has the same elements before and after the call.
    pub fn with_pushed<F, Y, E>(&mut self, x: A, f: F) -> Result<Y, E>
    where
        F: FnOnce(&mut Stack<A>) -> Result<Y, E>,
    {
        self.0.push(x);
        let y = f(self);
        self.0.pop();
        y
    }

    /// Iterate through the elements of the stack starting from the top.
    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.0.iter().rev()
    }
}

impl<A: PartialEq> Stack<A> {
    pub fn contains(&self, x: &A) -> bool {
        self.0.contains(x)
    }
}

impl<A> Default for Stack<A> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

#[test]
fn pushed_then_popped() {
    let mut stack = Stack::new();
    let top = stack.with_pushed("x", |s| s.with_pushed("y", |s| Ok::<_, ()>(s.iter().next().copied())));
    assert_eq!(top, Ok(Some("y")));
    assert!(stack.is_empty());

    let failed: Result<(), _> = stack.with_pushed("x", |_| Err(()));
    assert_eq!(failed, Err(()));
    assert_eq!(stack.len(), 0);
}
