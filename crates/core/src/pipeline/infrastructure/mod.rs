pub mod interval_tick_source;
