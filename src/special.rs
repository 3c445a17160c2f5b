/// Special functions backing the hydrogen wavefunction:
/// factorials, Legendre and Laguerre polynomials.

use once_cell::sync::Lazy;

/// Largest n for which n! still fits in a u64.
const MAX_EXACT_FACTORIAL: u32 = 20;

const LN_FACTORIAL_TABLE_LEN: usize = 1024;

static LN_FACTORIAL: Lazy<Vec<f64>> = Lazy::new(|| {
    let mut table = Vec::with_capacity(LN_FACTORIAL_TABLE_LEN);
    let mut acc = 0.0_f64;
    table.push(acc);
    for k in 1..LN_FACTORIAL_TABLE_LEN {
        acc += (k as f64).ln();
        table.push(acc);
    }
    table
});

/// Calculate factorial of a u32. Returns None once the result overflows u64.
pub fn factorial(n: u32) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

/// ln(n!)
pub fn ln_factorial(n: u32) -> f64 {
    match LN_FACTORIAL.get(n as usize) {
        Some(v) => *v,
        None => {
            let tail: f64 = (LN_FACTORIAL_TABLE_LEN as u32..=n)
                .map(|k| (k as f64).ln())
                .sum();
            LN_FACTORIAL[LN_FACTORIAL_TABLE_LEN - 1] + tail
        }
    }
}

/// a! / b! as a float.
///
/// Exact integer factorials are used while both fit in a u64; beyond that the
/// ratio goes through log-factorials so it never overflows.
pub fn factorial_ratio(a: u32, b: u32) -> f64 {
    if a.max(b) <= MAX_EXACT_FACTORIAL {
        if let (Some(fa), Some(fb)) = (factorial(a), factorial(b)) {
            return fa as f64 / fb as f64;
        }
    }
    (ln_factorial(a) - ln_factorial(b)).exp()
}

/// Double factorial n!! = n * (n-2) * (n-4) * ... * 1 or 2
pub fn factorial_double(n: u32) -> f64 {
    let mut result = 1.0_f64;
    let mut i = n;
    while i > 1 {
        result *= i as f64;
        i -= 2;
    }
    result
}

/// Legendre polynomial P_n(x)
pub fn legendre_polynomial(x: f64, n: u32) -> f64 {
    match n {
        0 => 1.0,
        1 => x,
        _ => {
            let mut p0 = 1.0;
            let mut p1 = x;

            for i in 2..=n {
                let i_f = i as f64;
                let p_new = ((2.0 * i_f - 1.0) * x * p1 - (i_f - 1.0) * p0) / i_f;
                p0 = p1;
                p1 = p_new;
            }

            p1
        }
    }
}

/// Associated Legendre function P^m_n(x), Condon-Shortley phase included.
pub fn associated_legendre(x: f64, n: u32, m: u32) -> f64 {
    if m > n {
        return 0.0;
    }
    if m == 0 {
        return legendre_polynomial(x, n);
    }

    let m_f = m as f64;
    let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
    let pmm = sign * (1.0 - x * x).max(0.0).powf(m_f / 2.0) * factorial_double(2 * m - 1);

    if n == m {
        return pmm;
    }

    let pm1m = x * (2.0 * m_f + 1.0) * pmm;

    if n == m + 1 {
        return pm1m;
    }

    let mut pmn = pmm;
    let mut pm1n = pm1m;

    for i in (m + 2)..=n {
        let i_f = i as f64;
        let pn = ((2.0 * i_f - 1.0) * x * pm1n - (i_f + m_f - 1.0) * pmn) / (i_f - m_f);
        pmn = pm1n;
        pm1n = pn;
    }

    pm1n
}

/// Generalized Laguerre polynomial L^a_n(x)
pub fn laguerre_polynomial(x: f64, n: u32, alpha: u32) -> f64 {
    if n == 0 {
        return 1.0;
    }

    let alpha_f = alpha as f64;
    let mut l0 = 1.0;
    let mut l1 = 1.0 + alpha_f - x;

    if n == 1 {
        return l1;
    }

    for i in 2..=n {
        let i_f = i as f64;
        let l_new = ((2.0 * i_f - 1.0 + alpha_f - x) * l1 - (i_f - 1.0 + alpha_f) * l0) / i_f;
        l0 = l1;
        l1 = l_new;
    }

    l1
}
