use std::fmt;

/// Result of a single test operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn passed(self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

/// Conversion from an operation's return value into a [`Verdict`].
///
/// `Err` carries the rejected value, rendered for diagnostics.
pub trait IntoVerdict {
    fn into_verdict(self) -> Result<Verdict, String>;
}

impl IntoVerdict for Verdict {
    fn into_verdict(self) -> Result<Verdict, String> {
        Ok(self)
    }
}

impl IntoVerdict for bool {
    fn into_verdict(self) -> Result<Verdict, String> {
        Ok(Verdict::from(self))
    }
}

macro_rules! impl_into_verdict_for_int {
    ($($ty:ty),*) => {
        $(
            impl IntoVerdict for $ty {
                fn into_verdict(self) -> Result<Verdict, String> {
                    match self {
                        0 => Ok(Verdict::Fail),
                        1 => Ok(Verdict::Pass),
                        other => Err(other.to_string()),
                    }
                }
            }
        )*
    };
}

impl_into_verdict_for_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

type Invoke<S> = Box<dyn Fn(&mut S) -> Result<Verdict, String>>;

/// A named, callable member of a suite fixture.
///
/// Every member is a discovery candidate; only those whose name matches a
/// configured prefix become test operations.
pub struct Member<S> {
    name: &'static str,
    doc: Option<String>,
    invoke: Invoke<S>,
}

impl<S> Member<S> {
    pub fn new<F, R>(name: &'static str, operation: F) -> Self
    where
        S: 'static,
        F: Fn(&mut S) -> R + 'static,
        R: IntoVerdict + 'static,
    {
        Self {
            name,
            doc: None,
            invoke: Box::new(move |fixture: &mut S| operation(fixture).into_verdict()),
        }
    }

    /// Attaches a description. Doc-comment text is normalized: lines are
    /// trimmed and joined with single spaces; blank text means no description.
    pub fn with_doc(mut self, doc: &str) -> Self {
        let joined = doc
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        self.doc = if joined.is_empty() { None } else { Some(joined) };
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Human-readable identifier: the doc text, or the name when undocumented.
    pub fn description(&self) -> &str {
        self.doc.as_deref().unwrap_or(self.name)
    }

    pub(crate) fn invoke(&self, fixture: &mut S) -> Result<Verdict, String> {
        (self.invoke)(fixture)
    }
}

impl<S> fmt::Debug for Member<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

/// Enumerates the callable members of a fixture type, in declaration order.
///
/// Usually generated by [`test_suite!`](crate::test_suite).
pub trait Members: Sized {
    fn members() -> Vec<Member<Self>>;
}

/// Declares a suite fixture's methods and registers them as members.
///
/// Each method takes `&mut self` and returns a `bool`, a [`Verdict`], or an
/// integer. Its doc comment becomes the description printed for it.
///
/// ```
/// use tally::{test_suite, Suite};
///
/// #[derive(Default)]
/// struct Arithmetic;
///
/// test_suite! {
///     impl Arithmetic {
///         /// Addition is commutative.
///         fn test_commutative(&mut self) -> bool {
///             1 + 2 == 2 + 1
///         }
///     }
/// }
///
/// let suite = Suite::new(Arithmetic);
/// assert_eq!(suite.operation_names(), vec!["test_commutative"]);
/// ```
#[macro_export]
macro_rules! test_suite {
    (
        impl $suite:ty {
            $(
                $(#[doc = $doc:literal])*
                fn $name:ident(&mut $this:ident) -> $ret:ty $body:block
            )*
        }
    ) => {
        impl $suite {
            $(
                $(#[doc = $doc])*
                pub fn $name(&mut $this) -> $ret $body
            )*
        }

        impl $crate::Members for $suite {
            fn members() -> ::std::vec::Vec<$crate::Member<Self>> {
                ::std::vec![
                    $(
                        $crate::Member::new(::std::stringify!($name), <$suite>::$name)
                            .with_doc(::std::concat!($($doc, "\n",)* "")),
                    )*
                ]
            }
        }
    };
}
