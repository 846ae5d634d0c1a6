//! Singly-linked stack, used as the pending-directory work list.

/// Single-linked stack.
pub struct Stack<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

struct Node<T> {
    data: T,
    next: Option<Box<Node<T>>>,
}

impl<T> Stack<T> {
    pub fn new() -> Stack<T> {
        Stack { root: None, len: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn push(&mut self, data: T) {
        let next = self.root.take();
        self.root = Some(Box::new(Node { data, next }));
        self.len += 1;
    }

    pub fn pop(&mut self) -> Option<T> {
        self.root.take().map(|n| {
            self.root = n.next;
            self.len -= 1;
            n.data
        })
    }

    #[cfg(test)]
    pub fn peek(&self) -> Option<&T> {
        self.root.as_ref().map(|n| &n.data)
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Stack::new()
    }
}

/// Pushes in iteration order, so the last item is popped first.
impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

// long chains would otherwise drop recursively
impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        let mut cur = self.root.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
    }
}

#[test]
fn test_empty() {
    let mut stack: Stack<i32> = Stack::new();
    assert!(stack.is_empty());
    assert_eq!(stack.len(), 0);
    assert_eq!(stack.peek(), None);
    assert_eq!(stack.pop(), None);
}

#[test]
fn test_push_one() {
    let mut stack = Stack::new();
    stack.push(3);
    assert!(!stack.is_empty());
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.peek(), Some(&3));
    assert_eq!(stack.pop(), Some(3));
    assert_eq!(stack.peek(), None);
    assert_eq!(stack.pop(), None);
    assert_eq!(stack.len(), 0);
}

#[test]
fn test_extend_order() {
    let mut stack = Stack::new();
    stack.extend(vec!["a", "b", "c"].into_iter().rev());
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.pop(), Some("a"));
    assert_eq!(stack.pop(), Some("b"));
    assert_eq!(stack.pop(), Some("c"));
    assert!(stack.is_empty());
}

#[test]
fn test_drop_long_chain() {
    let mut stack = Stack::new();
    stack.extend(0..200_000);
    assert_eq!(stack.len(), 200_000);
    drop(stack);
}
