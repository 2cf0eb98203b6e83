//! Booking
//!
//! Validated reservation creation. The request may pick an existing guardian
//! and pet or describe new ones; every field is checked before any record is
//! written, and failures come back as one [`AppError`] with a detail per
//! field (`userId`, `petId`, `hotelId`, `checkinDate`, `checkoutDate`, ...).

use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{PetCreate, Reservation, ReservationCreate, Role, User, UserCreate};
use shared::util::new_id;

use crate::core::StoreState;
use crate::utils::validation::{
    FieldErrors, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, parse_date, validate_email,
    validate_optional_text, validate_required_text,
};

/// Guardian of the booked pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum GuardianChoice {
    Existing {
        id: String,
    },
    New {
        name: String,
        email: String,
        #[serde(default)]
        phone: Option<String>,
    },
}

/// Pet to board; a new pet is owned by the chosen guardian
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum PetChoice {
    Existing {
        id: String,
    },
    New {
        name: String,
        species: String,
        #[serde(default)]
        age: Option<u32>,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub guardian: Option<GuardianChoice>,
    pub pet: Option<PetChoice>,
    pub hotel_id: Option<String>,
    pub checkin_date: String,
    pub checkout_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct BookingService {
    state: StoreState,
}

impl BookingService {
    pub fn new(state: StoreState) -> Self {
        Self { state }
    }

    fn validate(&self, req: &BookingRequest) -> AppResult<()> {
        let mut errors = FieldErrors::new();

        let mut guardian_id = None;
        match &req.guardian {
            None => errors.add("userId", "Select a guardian or add a new one"),
            Some(GuardianChoice::Existing { id }) => {
                if self.state.users.get(id).is_none() {
                    errors.add("userId", format!("Guardian {id} does not exist"));
                } else {
                    guardian_id = Some(id.as_str());
                }
            }
            Some(GuardianChoice::New { name, email, phone }) => {
                errors.check(
                    "newGuardianName",
                    validate_required_text(name, "guardian name", MAX_NAME_LEN),
                );
                errors.check("newGuardianEmail", validate_email(email));
                errors.check(
                    "newGuardianPhone",
                    validate_optional_text(phone, "phone", MAX_SHORT_TEXT_LEN),
                );
                if !errors.has("newGuardianEmail")
                    && self.state.users.find_by_email(email).is_some()
                {
                    errors.add(
                        "newGuardianEmail",
                        format!("{} is already registered", email.trim()),
                    );
                }
            }
        }

        match &req.pet {
            None => errors.add("petId", "Select a pet or add a new one"),
            Some(PetChoice::Existing { id }) => match self.state.pets.get(id) {
                None => errors.add("petId", format!("Pet {id} does not exist")),
                // An existing pet must belong to the chosen guardian; a new
                // guardian owns no pets yet
                Some(pet) => {
                    let foreign = match &req.guardian {
                        Some(GuardianChoice::Existing { .. }) => {
                            guardian_id.is_some_and(|owner| pet.user_id != owner)
                        }
                        Some(GuardianChoice::New { .. }) => true,
                        None => false,
                    };
                    if foreign {
                        errors.add("petId", format!("Pet {id} belongs to another guardian"));
                    }
                }
            },
            Some(PetChoice::New { name, species, .. }) => {
                errors.check("newPetName", validate_required_text(name, "pet name", MAX_NAME_LEN));
                errors.check(
                    "newPetSpecies",
                    validate_required_text(species, "species", MAX_SHORT_TEXT_LEN),
                );
            }
        }

        match req.hotel_id.as_deref().filter(|id| !id.trim().is_empty()) {
            None => errors.add("hotelId", "Select a hotel"),
            Some(id) => {
                if self.state.hotels.get(id).is_none() {
                    errors.add("hotelId", format!("Hotel {id} does not exist"));
                }
            }
        }

        errors.check("notes", validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN));

        let checkin = parse_date(&req.checkin_date, "check-in date");
        let checkout = parse_date(&req.checkout_date, "check-out date");
        match (checkin, checkout) {
            (Ok(checkin), Ok(checkout)) if checkout <= checkin => {
                let message = "Check-out date must be after check-in date";
                // Date order on an otherwise valid form gets its own code
                if errors.is_empty() {
                    let err = AppError::new(ErrorCode::ReservationInvalidDates);
                    return Err(err.with_detail("checkoutDate", message));
                }
                errors.add("checkoutDate", message);
            }
            (checkin, checkout) => {
                errors.check("checkinDate", checkin.map(|_| ()));
                errors.check("checkoutDate", checkout.map(|_| ()));
            }
        }

        errors.into_result()
    }

    fn resolve_guardian(&self, choice: GuardianChoice) -> AppResult<User> {
        match choice {
            GuardianChoice::Existing { id } => self
                .state
                .users
                .get(&id)
                .ok_or_else(|| AppError::not_found(format!("User {id}"))),
            GuardianChoice::New { name, email, phone } => {
                // Inline guardians cannot log in until they set a password
                let user = self.state.users.create(UserCreate {
                    name: name.trim().to_string(),
                    email,
                    phone,
                    role: Role::Guardian,
                    password: format!("{}{}", new_id(), new_id()),
                })?;
                Ok(user)
            }
        }
    }

    /// Validate, create any inline guardian / pet, then the `PENDING` reservation
    pub fn book(&self, req: BookingRequest) -> AppResult<Reservation> {
        self.validate(&req)?;

        let BookingRequest {
            guardian,
            pet,
            hotel_id,
            checkin_date,
            checkout_date,
            notes,
        } = req;

        let guardian = guardian.ok_or_else(|| AppError::validation("guardian is required"))?;
        let pet = pet.ok_or_else(|| AppError::validation("pet is required"))?;
        let hotel_id = hotel_id.ok_or_else(|| AppError::validation("hotel is required"))?;

        let user = self.resolve_guardian(guardian)?;

        let pet_id = match pet {
            PetChoice::Existing { id } => id,
            PetChoice::New { name, species, age } => {
                self.state
                    .pets
                    .create(PetCreate {
                        user_id: user.id.clone(),
                        name: name.trim().to_string(),
                        species: species.trim().to_string(),
                        age,
                        ..Default::default()
                    })?
                    .id
            }
        };

        let reservation = self.state.reservations.create(ReservationCreate {
            pet_id,
            user_id: user.id,
            hotel_id,
            checkin_date: checkin_date.trim().to_string(),
            checkout_date: checkout_date.trim().to_string(),
            notes: notes.filter(|n| !n.trim().is_empty()),
        })?;

        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{HotelCreate, ReservationStatus};

    fn setup() -> (StoreState, String) {
        let state = StoreState::in_memory();
        let hotel = state
            .hotels
            .create(HotelCreate {
                name: "Hotel PetCare BH".to_string(),
                ..Default::default()
            })
            .unwrap();
        (state, hotel.id)
    }

    fn request(hotel_id: &str) -> BookingRequest {
        BookingRequest {
            guardian: Some(GuardianChoice::New {
                name: "Bruno Lima".to_string(),
                email: "bruno@example.com".to_string(),
                phone: None,
            }),
            pet: Some(PetChoice::New {
                name: "Luna".to_string(),
                species: "cat".to_string(),
                age: Some(2),
            }),
            hotel_id: Some(hotel_id.to_string()),
            checkin_date: "2025-12-01".to_string(),
            checkout_date: "2025-12-05".to_string(),
            notes: Some("Indoor only".to_string()),
        }
    }

    #[test]
    fn test_book_with_inline_guardian_and_pet() {
        let (state, hotel_id) = setup();
        let reservation = state.booking().book(request(&hotel_id)).unwrap();

        assert_eq!(reservation.status, ReservationStatus::Pending);
        let user = state.users.get(&reservation.user_id).unwrap();
        assert_eq!(user.role, Role::Guardian);
        let pet = state.pets.get(&reservation.pet_id).unwrap();
        assert_eq!(pet.user_id, user.id);
        assert_eq!(pet.name, "Luna");
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let (state, _) = setup();
        let err = state.booking().book(BookingRequest::default()).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        for field in ["userId", "petId", "hotelId", "checkinDate", "checkoutDate"] {
            assert!(err.field_error(field).is_some(), "missing {field}");
        }
        assert!(state.users.list().is_empty());
        assert!(state.reservations.list().is_empty());
    }

    #[test]
    fn test_checkout_must_follow_checkin() {
        let (state, hotel_id) = setup();
        for (checkin, checkout) in [("2025-12-05", "2025-12-01"), ("2025-12-05", "2025-12-05")] {
            let err = state
                .booking()
                .book(BookingRequest {
                    checkin_date: checkin.to_string(),
                    checkout_date: checkout.to_string(),
                    ..request(&hotel_id)
                })
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::ReservationInvalidDates);
            assert!(err.field_error("checkoutDate").is_some());
        }

        // Alongside other failures the date order is one field among many
        let err = state
            .booking()
            .book(BookingRequest {
                hotel_id: None,
                checkout_date: "2025-11-30".to_string(),
                ..request(&hotel_id)
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.field_error("hotelId").is_some());
        assert!(err.field_error("checkoutDate").is_some());
        // Nothing written, including the inline records
        assert!(state.users.list().is_empty());
        assert!(state.pets.list().is_empty());
    }

    #[test]
    fn test_unknown_references_rejected() {
        let (state, _) = setup();
        let err = state
            .booking()
            .book(BookingRequest {
                guardian: Some(GuardianChoice::Existing {
                    id: "nope".to_string(),
                }),
                pet: Some(PetChoice::Existing {
                    id: "nope".to_string(),
                }),
                ..request("nope")
            })
            .unwrap_err();
        assert!(err.field_error("userId").is_some());
        assert!(err.field_error("petId").is_some());
        assert!(err.field_error("hotelId").is_some());
    }

    #[test]
    fn test_existing_pet_must_belong_to_guardian() {
        let (state, hotel_id) = setup();
        let first = state.booking().book(request(&hotel_id)).unwrap();
        let second = state
            .booking()
            .book(BookingRequest {
                guardian: Some(GuardianChoice::New {
                    name: "Carla Souza".to_string(),
                    email: "carla@example.com".to_string(),
                    phone: None,
                }),
                ..request(&hotel_id)
            })
            .unwrap();

        // Bruno's guardian with Carla's pet
        let err = state
            .booking()
            .book(BookingRequest {
                guardian: Some(GuardianChoice::Existing {
                    id: first.user_id.clone(),
                }),
                pet: Some(PetChoice::Existing {
                    id: second.pet_id.clone(),
                }),
                ..request(&hotel_id)
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.field_error("petId").is_some());

        // A brand-new guardian owns no existing pet
        let err = state
            .booking()
            .book(BookingRequest {
                guardian: Some(GuardianChoice::New {
                    name: "Davi Rocha".to_string(),
                    email: "davi@example.com".to_string(),
                    phone: None,
                }),
                pet: Some(PetChoice::Existing {
                    id: first.pet_id.clone(),
                }),
                ..request(&hotel_id)
            })
            .unwrap_err();
        assert!(err.field_error("petId").is_some());
        assert!(state.users.find_by_email("davi@example.com").is_none());
        assert_eq!(state.reservations.list().len(), 2);

        // The owner can book their own pet again
        let again = state
            .booking()
            .book(BookingRequest {
                guardian: Some(GuardianChoice::Existing {
                    id: first.user_id.clone(),
                }),
                pet: Some(PetChoice::Existing {
                    id: first.pet_id.clone(),
                }),
                ..request(&hotel_id)
            })
            .unwrap();
        assert_eq!(again.pet_id, first.pet_id);
    }

    #[test]
    fn test_inline_guardian_email_taken() {
        let (state, hotel_id) = setup();
        state.booking().book(request(&hotel_id)).unwrap();
        let err = state.booking().book(request(&hotel_id)).unwrap_err();
        assert!(err.field_error("newGuardianEmail").is_some());
        assert_eq!(state.reservations.list().len(), 1);
    }

    #[test]
    fn test_request_from_json() {
        let (state, hotel_id) = setup();
        let json = serde_json::json!({
            "guardian": {"mode": "new", "name": "Carla", "email": "carla@example.com"},
            "pet": {"mode": "new", "name": "Bob", "species": "dog"},
            "hotelId": hotel_id,
            "checkinDate": "2025-12-01",
            "checkoutDate": "2025-12-02"
        });
        let req: BookingRequest = serde_json::from_value(json).unwrap();
        let reservation = state.booking().book(req).unwrap();
        assert_eq!(reservation.notes, None);
    }
}
