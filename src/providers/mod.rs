pub mod freecurrency;
