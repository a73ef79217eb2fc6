// ── Macro for wire-code enum boilerplate ──────────────────────────────
//
// Every closed enumeration in this crate follows the same pattern: a
// fixed set of named variants, each mapped to one wire code and one
// display name, plus the conversions in both directions. This macro
// keeps each enum's doc comments and derive list explicit at the call
// site while generating the lookup tables.

macro_rules! wire_enum {
  (
    $(#[$meta:meta])*
    pub enum $name:ident : $repr:ty {
      $( $(#[$vmeta:meta])* $variant:ident = $wire:literal => $display:literal ),+ $(,)?
    }
  ) => {
    $(#[$meta])*
    pub enum $name {
      $( $(#[$vmeta])* $variant ),+
    }

    impl $name {
      /// Every variant, in declaration order.
      pub const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

      /// Encode this variant as its wire code.
      pub fn to_wire(self) -> $repr {
        match self {
          $( Self::$variant => $wire ),+
        }
      }

      /// Decode a wire code into this enum.
      ///
      /// Returns `Err(TypeError::UnknownValue)` if the code doesn't
      /// match any known variant.
      pub fn from_wire(value: $repr) -> Result<Self, $crate::TypeError> {
        match value {
          $( $wire => Ok(Self::$variant), )+
          other => Err($crate::TypeError::UnknownValue {
            enum_name: stringify!($name),
            value: u32::from(other),
          }),
        }
      }

      /// The display name used in diagnostics.
      pub fn name(self) -> &'static str {
        match self {
          $( Self::$variant => $display ),+
        }
      }

      /// Look a variant up by its display name.
      pub fn from_name(name: &str) -> Result<Self, $crate::TypeError> {
        Self::ALL
          .iter()
          .copied()
          .find(|v| v.name() == name)
          .ok_or_else(|| $crate::TypeError::UnknownName {
            enum_name: stringify!($name),
            name: name.to_owned(),
          })
      }
    }

    impl std::fmt::Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
      }
    }
  };
}
