//! Built-in functions

pub mod date;
pub mod info;
pub mod logical;
pub mod lookup;
pub mod math;
pub mod statistical;
pub mod text;

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::{EvaluationContext, FormulaValue};
use ahash::AHashMap;

/// Function implementation signature
///
/// Functions receive their arguments as unevaluated text and resolve them
/// through the helpers in [`crate::args`].
pub type FunctionImpl = fn(&[String], &EvaluationContext) -> FormulaResult<FormulaValue>;

/// Function definition
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
    /// Is volatile (result changes between evaluations of an unchanged grid)
    pub volatile: bool,
}

impl FunctionDef {
    /// Check the argument count and run the implementation
    pub fn call(&self, args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
        if args.len() < self.min_args {
            return Err(FormulaError::ArgumentCount {
                function: self.name.to_string(),
                expected: format!("at least {}", self.min_args),
                actual: args.len(),
            });
        }

        if let Some(max) = self.max_args {
            if args.len() > max {
                return Err(FormulaError::ArgumentCount {
                    function: self.name.to_string(),
                    expected: format!("at most {}", max),
                    actual: args.len(),
                });
            }
        }

        (self.implementation)(args, ctx)
    }
}

/// Function registry
pub struct FunctionRegistry {
    functions: AHashMap<String, FunctionDef>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: AHashMap::new(),
        };

        registry.register_math_functions();
        registry.register_statistical_functions();
        registry.register_logical_functions();
        registry.register_text_functions();
        registry.register_lookup_functions();
        registry.register_date_functions();
        registry.register_info_functions();

        registry
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&name.to_uppercase())
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.to_uppercase(), def);
    }

    /// All registered definitions, sorted by name
    pub fn definitions(&self) -> Vec<&FunctionDef> {
        let mut defs: Vec<&FunctionDef> = self.functions.values().collect();
        defs.sort_by_key(|def| def.name);
        defs
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn register_math_functions(&mut self) {
        // SUM
        self.register(FunctionDef {
            name: "SUM",
            min_args: 1,
            max_args: None,
            implementation: math::fn_sum,
            volatile: false,
        });

        // AVERAGE
        self.register(FunctionDef {
            name: "AVERAGE",
            min_args: 1,
            max_args: None,
            implementation: math::fn_average,
            volatile: false,
        });

        // COUNT
        self.register(FunctionDef {
            name: "COUNT",
            min_args: 1,
            max_args: None,
            implementation: math::fn_count,
            volatile: false,
        });

        // MAX
        self.register(FunctionDef {
            name: "MAX",
            min_args: 1,
            max_args: None,
            implementation: math::fn_max,
            volatile: false,
        });

        // MIN
        self.register(FunctionDef {
            name: "MIN",
            min_args: 1,
            max_args: None,
            implementation: math::fn_min,
            volatile: false,
        });

        // PRODUCT
        self.register(FunctionDef {
            name: "PRODUCT",
            min_args: 1,
            max_args: None,
            implementation: math::fn_product,
            volatile: false,
        });

        // ABS
        self.register(FunctionDef {
            name: "ABS",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_abs,
            volatile: false,
        });

        // ROUND
        self.register(FunctionDef {
            name: "ROUND",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_round,
            volatile: false,
        });

        // FLOOR
        self.register(FunctionDef {
            name: "FLOOR",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_floor,
            volatile: false,
        });

        // CEILING
        self.register(FunctionDef {
            name: "CEILING",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_ceiling,
            volatile: false,
        });

        // INT
        self.register(FunctionDef {
            name: "INT",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_int,
            volatile: false,
        });

        // SQRT
        self.register(FunctionDef {
            name: "SQRT",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_sqrt,
            volatile: false,
        });

        // POWER
        self.register(FunctionDef {
            name: "POWER",
            min_args: 2,
            max_args: Some(2),
            implementation: math::fn_power,
            volatile: false,
        });

        // MOD
        self.register(FunctionDef {
            name: "MOD",
            min_args: 2,
            max_args: Some(2),
            implementation: math::fn_mod,
            volatile: false,
        });

        // PI
        self.register(FunctionDef {
            name: "PI",
            min_args: 0,
            max_args: Some(0),
            implementation: math::fn_pi,
            volatile: false,
        });

        // RAND (volatile)
        self.register(FunctionDef {
            name: "RAND",
            min_args: 0,
            max_args: Some(0),
            implementation: math::fn_rand,
            volatile: true,
        });

        // RANDBETWEEN (volatile)
        self.register(FunctionDef {
            name: "RANDBETWEEN",
            min_args: 2,
            max_args: Some(2),
            implementation: math::fn_randbetween,
            volatile: true,
        });
    }

    fn register_statistical_functions(&mut self) {
        // COUNTA
        self.register(FunctionDef {
            name: "COUNTA",
            min_args: 1,
            max_args: None,
            implementation: statistical::fn_counta,
            volatile: false,
        });

        // MEDIAN
        self.register(FunctionDef {
            name: "MEDIAN",
            min_args: 1,
            max_args: None,
            implementation: statistical::fn_median,
            volatile: false,
        });

        // STDEV
        self.register(FunctionDef {
            name: "STDEV",
            min_args: 1,
            max_args: None,
            implementation: statistical::fn_stdev,
            volatile: false,
        });

        // VAR
        self.register(FunctionDef {
            name: "VAR",
            min_args: 1,
            max_args: None,
            implementation: statistical::fn_var,
            volatile: false,
        });
    }

    fn register_logical_functions(&mut self) {
        // IF
        self.register(FunctionDef {
            name: "IF",
            min_args: 2,
            max_args: Some(3),
            implementation: logical::fn_if,
            volatile: false,
        });

        // AND
        self.register(FunctionDef {
            name: "AND",
            min_args: 1,
            max_args: None,
            implementation: logical::fn_and,
            volatile: false,
        });

        // OR
        self.register(FunctionDef {
            name: "OR",
            min_args: 1,
            max_args: None,
            implementation: logical::fn_or,
            volatile: false,
        });

        // NOT
        self.register(FunctionDef {
            name: "NOT",
            min_args: 1,
            max_args: Some(1),
            implementation: logical::fn_not,
            volatile: false,
        });
    }

    fn register_text_functions(&mut self) {
        // CONCAT
        self.register(FunctionDef {
            name: "CONCAT",
            min_args: 1,
            max_args: None,
            implementation: text::fn_concat,
            volatile: false,
        });

        // CONCATENATE
        self.register(FunctionDef {
            name: "CONCATENATE",
            min_args: 1,
            max_args: None,
            implementation: text::fn_concat,
            volatile: false,
        });

        // UPPER
        self.register(FunctionDef {
            name: "UPPER",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_upper,
            volatile: false,
        });

        // LOWER
        self.register(FunctionDef {
            name: "LOWER",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_lower,
            volatile: false,
        });

        // PROPER
        self.register(FunctionDef {
            name: "PROPER",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_proper,
            volatile: false,
        });

        // TRIM
        self.register(FunctionDef {
            name: "TRIM",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_trim,
            volatile: false,
        });

        // LEN
        self.register(FunctionDef {
            name: "LEN",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_len,
            volatile: false,
        });

        // LEFT
        self.register(FunctionDef {
            name: "LEFT",
            min_args: 1,
            max_args: Some(2),
            implementation: text::fn_left,
            volatile: false,
        });

        // RIGHT
        self.register(FunctionDef {
            name: "RIGHT",
            min_args: 1,
            max_args: Some(2),
            implementation: text::fn_right,
            volatile: false,
        });

        // MID
        self.register(FunctionDef {
            name: "MID",
            min_args: 3,
            max_args: Some(3),
            implementation: text::fn_mid,
            volatile: false,
        });

        // SUBSTITUTE
        self.register(FunctionDef {
            name: "SUBSTITUTE",
            min_args: 3,
            max_args: Some(3),
            implementation: text::fn_substitute,
            volatile: false,
        });

        // REPT
        self.register(FunctionDef {
            name: "REPT",
            min_args: 2,
            max_args: Some(2),
            implementation: text::fn_rept,
            volatile: false,
        });
    }

    fn register_lookup_functions(&mut self) {
        // UNIQUE
        self.register(FunctionDef {
            name: "UNIQUE",
            min_args: 1,
            max_args: None,
            implementation: lookup::fn_unique,
            volatile: false,
        });

        // COUNTIF
        self.register(FunctionDef {
            name: "COUNTIF",
            min_args: 2,
            max_args: Some(2),
            implementation: lookup::fn_countif,
            volatile: false,
        });

        // SUMIF
        self.register(FunctionDef {
            name: "SUMIF",
            min_args: 2,
            max_args: Some(3),
            implementation: lookup::fn_sumif,
            volatile: false,
        });
    }

    fn register_date_functions(&mut self) {
        // TODAY (volatile)
        self.register(FunctionDef {
            name: "TODAY",
            min_args: 0,
            max_args: Some(0),
            implementation: date::fn_today,
            volatile: true,
        });

        // NOW (volatile)
        self.register(FunctionDef {
            name: "NOW",
            min_args: 0,
            max_args: Some(0),
            implementation: date::fn_now,
            volatile: true,
        });

        // YEAR
        self.register(FunctionDef {
            name: "YEAR",
            min_args: 0,
            max_args: Some(1),
            implementation: date::fn_year,
            volatile: false,
        });

        // MONTH
        self.register(FunctionDef {
            name: "MONTH",
            min_args: 0,
            max_args: Some(1),
            implementation: date::fn_month,
            volatile: false,
        });

        // DAY
        self.register(FunctionDef {
            name: "DAY",
            min_args: 0,
            max_args: Some(1),
            implementation: date::fn_day,
            volatile: false,
        });
    }

    fn register_info_functions(&mut self) {
        // ISNUMBER
        self.register(FunctionDef {
            name: "ISNUMBER",
            min_args: 1,
            max_args: Some(1),
            implementation: info::fn_isnumber,
            volatile: false,
        });

        // ISBLANK
        self.register(FunctionDef {
            name: "ISBLANK",
            min_args: 1,
            max_args: Some(1),
            implementation: info::fn_isblank,
            volatile: false,
        });

        // ISTEXT
        self.register(FunctionDef {
            name: "ISTEXT",
            min_args: 1,
            max_args: Some(1),
            implementation: info::fn_istext,
            volatile: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegrid_core::Grid;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = FunctionRegistry::new();
        assert!(registry.get("sum").is_some());
        assert!(registry.get("Concatenate").is_some());
        assert!(registry.get("FAKE").is_none());
    }

    #[test]
    fn test_definitions_sorted() {
        let registry = FunctionRegistry::new();
        let names: Vec<&str> = registry.definitions().iter().map(|d| d.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), registry.len());
        assert!(names.contains(&"RANDBETWEEN"));
    }

    #[test]
    fn test_arity_checked_before_call() {
        let registry = FunctionRegistry::new();
        let grid = Grid::default();
        let ctx = EvaluationContext::new(&grid);
        let abs = registry.get("ABS").unwrap();

        let err = abs.call(&[], &ctx).unwrap_err();
        assert!(matches!(err, FormulaError::ArgumentCount { actual: 0, .. }));

        let two = vec!["1".to_string(), "2".to_string()];
        let err = abs.call(&two, &ctx).unwrap_err();
        assert!(err.to_string().contains("at most 1"));

        let one = vec!["-3".to_string()];
        assert_eq!(abs.call(&one, &ctx).unwrap(), FormulaValue::Number(3.0));
    }
}
