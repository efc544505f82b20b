pub const STANDARD_MATH: [&str; 6] = [
    "2 + 2 * 3",
    "sqrt(144)",
    "sin(pi / 2)",
    "10^3",
    "log(100)",
    "abs(-42)",
];

pub const NATURAL_LANGUAGE: [&str; 5] = [
    "10% of 5",
    "square root of 144",
    "25 plus 17",
    "area of a circle with radius 5",
    "convert 45 degrees to radians",
];

/// Quick reference: symbol and what it does.
pub const OPERATIONS: [(&str, &str); 12] = [
    ("+", "Addition"),
    ("-", "Subtraction"),
    ("×", "Multiplication"),
    ("÷", "Division"),
    ("^", "Exponentiation"),
    ("sqrt()", "Square root"),
    ("log()", "Logarithm (base 10)"),
    ("sin()", "Sine (radians)"),
    ("cos()", "Cosine (radians)"),
    ("tan()", "Tangent (radians)"),
    ("abs()", "Absolute value"),
    ("()", "Parentheses grouping"),
];

pub fn print() {
    for (title, group) in [
        ("Standard Math", &STANDARD_MATH[..]),
        ("Natural Language", &NATURAL_LANGUAGE[..]),
    ] {
        println!("{title}");
        for expression in group {
            println!("  {expression}");
        }
    }

    println!("Supported Operations");
    for (symbol, description) in OPERATIONS {
        println!("  {symbol:<8}{description}");
    }
}
