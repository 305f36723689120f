#![allow(dead_code)]

/// Benchmark programs, inline so the workloads are pinned to the bench.
pub const WORKLOADS: [(&str, &str); 3] = [
    (
        "fib",
        "def fib(n) {\n  if n < 2 { return n }\n  return fib(n - 1) + fib(n - 2)\n}\nprint(fib(18))\n",
    ),
    (
        "dict_churn",
        "d = {}\nn = 0\nfor n < 500 {\n  d[n] = n * 2\n  n += 1\n}\ntotal = 0\nfor i, k in [0, 100, 250, 499] {\n  total += d[k]\n}\nprint(total)\n",
    ),
    (
        "string_walk",
        "s = \"the quick brown fox jumps over the lazy dog\"\ncount = 0\nfor i, c in s {\n  if c == \"o\" { count += 1 }\n}\nprint(count)\n",
    ),
];
