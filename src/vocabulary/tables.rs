//! Built-in vocabulary tables
//!
//! Spellings are lower case; matching runs over lower-cased text.
//! Extend the recognizer by editing these tables.

use super::MultiplierClass;
use crate::price::CurrencyCode;

pub(super) struct CurrencyEntry {
    pub code: CurrencyCode,
    pub symbols: &'static [&'static str],
    pub codes: &'static [&'static str],
    pub words: &'static [&'static str],
}

pub(super) struct MultiplierEntry {
    pub factor: f64,
    pub class: MultiplierClass,
    pub implies: Option<CurrencyCode>,
    pub spellings: &'static [&'static str],
    /// Forms that mean "one unit" when no number precedes them
    pub standalone: &'static [&'static str],
}

pub(super) const CURRENCIES: &[CurrencyEntry] = &[
    CurrencyEntry {
        code: CurrencyCode::Usd,
        symbols: &["$"],
        codes: &["usd"],
        words: &[
            "бакс", "бакса", "баксов", "баксы", "баксах", "баксам", "доллар", "доллара",
            "долларов", "доллары", "долларах", "долл", "dollar", "dollars", "buck", "bucks",
        ],
    },
    CurrencyEntry {
        code: CurrencyCode::Eur,
        symbols: &["€"],
        codes: &["eur"],
        words: &["евро", "евриков", "euro", "euros"],
    },
    CurrencyEntry {
        code: CurrencyCode::Rub,
        symbols: &["₽"],
        codes: &["rub"],
        words: &[
            "р", "руб", "рубль", "рубля", "рублей", "рубли", "рублях", "ruble", "rubles",
            "rouble", "roubles",
        ],
    },
    CurrencyEntry {
        code: CurrencyCode::Gbp,
        symbols: &["£"],
        codes: &["gbp"],
        words: &["фунт", "фунта", "фунтов", "фунты", "pound", "pounds", "quid"],
    },
    CurrencyEntry {
        code: CurrencyCode::Kzt,
        symbols: &["₸"],
        codes: &["kzt"],
        words: &["тенге", "tenge"],
    },
    CurrencyEntry {
        code: CurrencyCode::Cny,
        symbols: &["¥"],
        codes: &["cny"],
        words: &["юань", "юаня", "юаней", "юани", "yuan", "rmb"],
    },
    CurrencyEntry {
        code: CurrencyCode::Jpy,
        symbols: &[],
        codes: &["jpy"],
        words: &["иена", "иены", "иен", "йена", "йены", "йен", "yen"],
    },
    CurrencyEntry {
        code: CurrencyCode::Uah,
        symbols: &["₴"],
        codes: &["uah"],
        words: &["гривна", "гривны", "гривен", "гривну", "грн", "hryvnia"],
    },
    CurrencyEntry {
        code: CurrencyCode::Byn,
        symbols: &[],
        codes: &["byn"],
        words: &[],
    },
    // "try" is an ordinary English verb, so the lira is only found by
    // its symbol and names.
    CurrencyEntry {
        code: CurrencyCode::Try,
        symbols: &["₺"],
        codes: &[],
        words: &["лира", "лиры", "лир", "lira", "liras"],
    },
    CurrencyEntry {
        code: CurrencyCode::Chf,
        symbols: &[],
        codes: &["chf"],
        words: &["франк", "франка", "франков", "франки", "franc", "francs"],
    },
    CurrencyEntry {
        code: CurrencyCode::Inr,
        symbols: &["₹"],
        codes: &["inr"],
        words: &["рупия", "рупии", "рупий", "rupee", "rupees"],
    },
    CurrencyEntry {
        code: CurrencyCode::Krw,
        symbols: &["₩"],
        codes: &["krw"],
        words: &["вона", "воны"],
    },
    CurrencyEntry {
        code: CurrencyCode::Btc,
        symbols: &["₿"],
        codes: &["btc"],
        words: &[
            "биток", "битка", "битков", "битки", "биткоин", "биткоина", "биткоинов", "биткойн",
            "биткойна", "биткойнов", "bitcoin", "bitcoins",
        ],
    },
    CurrencyEntry {
        code: CurrencyCode::Eth,
        symbols: &[],
        codes: &["eth"],
        words: &["эфир", "эфира", "эфиров", "эфириум", "эфириума", "ether", "ethereum"],
    },
    CurrencyEntry {
        code: CurrencyCode::Usdt,
        symbols: &[],
        codes: &["usdt"],
        words: &["тезер", "тезера", "tether"],
    },
];

pub(super) const MULTIPLIERS: &[MultiplierEntry] = &[
    MultiplierEntry {
        factor: 1e3,
        class: MultiplierClass::Suffix,
        implies: None,
        spellings: &["k", "к"],
        standalone: &[],
    },
    MultiplierEntry {
        factor: 1e6,
        class: MultiplierClass::Suffix,
        implies: None,
        spellings: &["m", "м"],
        standalone: &[],
    },
    MultiplierEntry {
        factor: 1e3,
        class: MultiplierClass::Scale,
        implies: None,
        spellings: &[
            "тыс", "тысяча", "тысячи", "тысяч", "тысячу", "тыщ", "тыщи", "тыща", "thousand",
            "thousands",
        ],
        standalone: &[],
    },
    MultiplierEntry {
        factor: 1e6,
        class: MultiplierClass::Scale,
        implies: None,
        spellings: &[
            "млн", "миллион", "миллиона", "миллионов", "миллионы", "mln", "million", "millions",
        ],
        standalone: &[],
    },
    MultiplierEntry {
        factor: 1e9,
        class: MultiplierClass::Scale,
        implies: None,
        spellings: &[
            "млрд", "миллиард", "миллиарда", "миллиардов", "bn", "billion", "billions",
        ],
        standalone: &[],
    },
    MultiplierEntry {
        factor: 1e3,
        class: MultiplierClass::Slang,
        implies: Some(CurrencyCode::Rub),
        spellings: &[
            "косарь", "косаря", "косарей", "косари", "косарик", "косарика", "косариков",
        ],
        standalone: &["косарь", "косарик"],
    },
    MultiplierEntry {
        factor: 1e6,
        class: MultiplierClass::Slang,
        implies: Some(CurrencyCode::Rub),
        spellings: &["лям", "ляма", "лямов", "лямы", "лимон", "лимона", "лимонов"],
        standalone: &["лям"],
    },
];

/// Product lines and chip names. A number on either side of one is a
/// model number ("rtx 5060", "5060 rtx").
pub(super) const PRODUCTS: &[&str] = &[
    "rtx", "gtx", "rx", "gpu", "cpu", "ti", "iphone", "galaxy", "ryzen", "core",
];

/// Units written after a quantity, a capacity or a date. Only the number
/// in front of one is affected: "512 гб 5000 руб" keeps the price.
pub(super) const UNITS: &[&str] = &[
    "gb", "гб", "mb", "мб", "tb", "тб", "kb", "кб", "ghz", "ггц", "mhz", "мгц", "hz", "гц",
    "bit", "bits", "бит", "бита", "битов", "mp", "мп", "dpi", "fps", "mm", "мм", "cm", "см",
    "kg", "кг", "г", "год", "года", "году", "лет", "шт", "штук", "штуки",
];
