#![forbid(unsafe_code)]

//! Built-in string cycles.

/// "Hello World!" in four languages' idioms.
pub const HELLO_WORLD: [&str; 4] = [
    "print(\"Hello World!\")",
    "System.out.println(\"Hello World!\");",
    "printf(\"Hello World!\");",
    "<h1>Hello World!</h1>",
];
