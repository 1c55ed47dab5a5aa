//! Sacrament kinds recorded against a member.

use crate::define_text_enum;

define_text_enum! {
    SacramentType {
        Baptism = "BAPTISM",
        Confirmation = "CONFIRMATION",
        Eucharist = "EUCHARIST",
        Marriage = "MARRIAGE",
        HolyOrders = "HOLY_ORDERS",
        AnointingOfTheSick = "ANOINTING_OF_THE_SICK",
        Funeral = "FUNERAL",
    }
}
